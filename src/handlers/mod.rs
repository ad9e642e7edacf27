pub mod resolver_handler;
