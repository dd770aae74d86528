/// Use cases module containing application business logic orchestration
mod resolve_overrides;

pub use resolve_overrides::ResolveOverridesUseCase;
