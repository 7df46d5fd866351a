//! Integration test driver for the `tests/integration/` submodules.
//!
//! Each `mod` below maps to a file that exercises a specific subsystem
//! against mock outputs.  All tests run on the host with no real
//! hardware required.

mod config_flow_tests;
mod mock_hw;
mod service_tests;
