//! Repository ports (interfaces). Implementations live in the Postgres
//! adapter under `database::infrastructure::postgres`.

pub mod movies;
