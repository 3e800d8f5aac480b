//! Tag extraction backend: the Hugging Face Inference API text-completion
//! client and its wire types.

pub(crate) mod client;
pub(crate) mod types;
