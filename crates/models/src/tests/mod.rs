

/// DB-backed tests are opt-in: they need `DATABASE_URL` and honour `SKIP_DB_TESTS`.
pub(crate) fn db_tests_disabled() -> bool {
    std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err()
}
