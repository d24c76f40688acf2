//! Codec tests.

/// Decoding, totality, and strict reserved-bit handling.
pub mod decode;



/// Typed record view.
pub mod record;
