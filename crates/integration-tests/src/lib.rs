//! End-to-end tests for the HighlightReader server live under `tests/`.
