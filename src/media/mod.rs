/// Image reference handling
///
/// This module handles:
/// - Classifying references as remote, inline or local (reference.rs)
/// - Resolving site paths against the asset root (reference.rs)
/// - Generating and caching grid thumbnails (thumbnail.rs)

pub mod reference;
pub mod thumbnail;
