pub mod account;
pub mod ingredients;
pub mod mix;
pub mod public;
pub mod recipes;
pub mod testing;

use serde::Serialize;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{OpenApi, ToSchema};

/// Shared error response used by all endpoints
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Clamp a caller-supplied page size.
pub(crate) fn cap_limit(requested: Option<i64>, default: i64, max: i64) -> i64 {
    requested.unwrap_or(default).clamp(1, max)
}

/// Generate the complete OpenAPI spec by merging all module specs
pub fn openapi() -> utoipa::openapi::OpenApi {
    // Base spec with shared components and security
    #[derive(OpenApi)]
    #[openapi(components(schemas(ErrorResponse)))]
    struct BaseApi;

    let mut spec = BaseApi::openapi();

    // Add security scheme
    if let Some(components) = spec.components.as_mut() {
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }

    // Merge in each module's spec
    let modules: Vec<utoipa::openapi::OpenApi> = vec![
        public::ApiDoc::openapi(),
        account::ApiDoc::openapi(),
        testing::ApiDoc::openapi(),
        recipes::ApiDoc::openapi(),
        ingredients::ApiDoc::openapi(),
        mix::ApiDoc::openapi(),
    ];

    for module_spec in modules {
        // Merge paths
        spec.paths.paths.extend(module_spec.paths.paths);

        // Merge components (schemas)
        if let Some(module_components) = module_spec.components {
            if let Some(spec_components) = spec.components.as_mut() {
                spec_components.schemas.extend(module_components.schemas);
            }
        }
    }

    spec
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cap_limit_bounds() {
        assert_eq!(cap_limit(None, 20, 100), 20);
        assert_eq!(cap_limit(Some(0), 20, 100), 1);
        assert_eq!(cap_limit(Some(-5), 20, 100), 1);
        assert_eq!(cap_limit(Some(500), 20, 100), 100);
        assert_eq!(cap_limit(Some(50), 20, 100), 50);
    }

    #[test]
    fn test_openapi_spec_builds() {
        let spec = openapi();
        assert!(spec.paths.paths.contains_key("/api/mix/recipes"));
        assert!(spec.paths.paths.contains_key("/api/auth/login"));
    }

    #[test]
    fn test_openapi_spec_has_count_and_mine_listings() {
        let spec = openapi();
        assert!(spec.paths.paths.contains_key("/api/ingredients/count"));
        assert!(spec.paths.paths.contains_key("/api/ingredients/mine"));
        assert!(spec.paths.paths.contains_key("/api/recipes/favorites/count"));
    }
}
