//! End-to-end tests for the AgriHub HTTP API live under `tests/`.
