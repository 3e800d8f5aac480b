//! Query pipeline: tag extraction, translation, namespace fan-out, and
//! date-based ranking.

pub(crate) mod dates;
pub(crate) mod engine;
pub(crate) mod tags;
