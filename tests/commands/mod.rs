//! Per-command integration tests

mod test_send;
