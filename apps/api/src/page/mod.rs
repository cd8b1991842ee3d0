// Tenant page composition: slug → rows → blocks → dispatch.
// The HTTP handler is the only entry point; each request owns its controller.

pub mod blocks;
pub mod controller;
pub mod dispatch;
pub mod handlers;
pub mod normalize;
pub mod slug;

pub use controller::{CompositionController, LoadOutcome, LoadSettings, PageState, ReadyPage};
pub use slug::{resolve_route, Route, RouteRules};
