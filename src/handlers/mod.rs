// Handlers are grouped by security tier:
// public (no auth) -> admin (session auth + active admin registry row).
pub mod admin;
pub mod public;
