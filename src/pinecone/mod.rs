//! Article index backend: the Pinecone query client and its wire types.

pub(crate) mod client;
pub(crate) mod types;
