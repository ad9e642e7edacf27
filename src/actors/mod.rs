pub mod messages;
pub mod resolver_actor;
