pub mod connection;
pub mod db;
