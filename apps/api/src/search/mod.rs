// Retrieval flow: query → embedding → top-K store lookup → normalized resume cards.

pub mod handlers;
pub mod retrieval;
