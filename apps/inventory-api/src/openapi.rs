//! OpenAPI documentation configuration

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

/// Combined OpenAPI documentation for the Inventory API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Inventory API",
        version = "0.1.0",
        description = "Product and category inventory with REST and gRPC access",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/products", api = domain_products::ApiDoc),
        (path = "/api/categories", api = domain_categories::ApiDoc)
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "Products", description = "Product catalog and stock endpoints"),
        (name = "Categories", description = "Category endpoints")
    )
)]
pub struct ApiDoc;

/// Registers the `bearer_auth` scheme referenced by the write endpoints.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_lists_both_resources_and_bearer_scheme() {
        let spec = ApiDoc::openapi();

        assert!(spec.paths.paths.contains_key("/api/products"));
        assert!(spec.paths.paths.contains_key("/api/products/{id}/stock"));
        assert!(spec.paths.paths.contains_key("/api/categories/{id}"));

        let components = spec.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
