// Shared support code for the integration test binaries. Not every test
// crate uses every symbol, so dead_code warnings are silenced here.
#[allow(dead_code)]
pub mod helpers;
#[allow(dead_code)]
pub mod mocks;

#[allow(unused_imports)]
pub use helpers::*;
#[allow(unused_imports)]
pub use mocks::*;
