mod helpers;

mod router_test;
mod schema_test;
mod vote_test;
