fn main() {
    let method = |name: &str, route: &str, input: &str, output: &str| {
        tonic_build::manual::Method::builder()
            .name(name)
            .route_name(route)
            .input_type(format!("crate::inventory::{input}"))
            .output_type(format!("crate::inventory::{output}"))
            .codec_path("tonic_prost::ProstCodec")
            .build()
    };

    let service = tonic_build::manual::Service::builder()
        .name("InventoryService")
        .package("inventory")
        .method(method("add_product", "AddProduct", "ProductRequest", "ProductResponse"))
        .method(method("get_product", "GetProduct", "ProductId", "ProductResponse"))
        .method(method(
            "list_products",
            "ListProducts",
            "ListProductsRequest",
            "ListProductsResponse",
        ))
        .method(method("update_stock", "UpdateStock", "UpdateStockRequest", "ProductResponse"))
        .method(method(
            "delete_product",
            "DeleteProduct",
            "ProductId",
            "DeleteProductResponse",
        ))
        .build();

    tonic_build::manual::Builder::new().compile(&[service]);
}
