//! Wire types and generated stubs for `inventory.InventoryService`.
//!
//! Messages are plain prost derives; the client/server stubs come from
//! `build.rs`, so no `.proto` file or protoc is needed to build.

pub mod inventory {
    #[derive(Clone, PartialEq, prost::Message)]
    pub struct ProductRequest {
        #[prost(string, tag = "1")]
        pub name: String,
        #[prost(string, tag = "2")]
        pub description: String,
        #[prost(double, tag = "3")]
        pub price: f64,
        #[prost(int32, tag = "4")]
        pub stock: i32,
        #[prost(string, tag = "5")]
        pub category_id: String,
    }

    #[derive(Clone, PartialEq, prost::Message)]
    pub struct ProductResponse {
        #[prost(string, tag = "1")]
        pub id: String,
        #[prost(string, tag = "2")]
        pub name: String,
        #[prost(string, tag = "3")]
        pub description: String,
        #[prost(double, tag = "4")]
        pub price: f64,
        #[prost(int32, tag = "5")]
        pub stock: i32,
        #[prost(string, tag = "6")]
        pub category_id: String,
    }

    #[derive(Clone, PartialEq, prost::Message)]
    pub struct ProductId {
        #[prost(string, tag = "1")]
        pub id: String,
    }

    /// `limit <= 0` returns every remaining product. `category_id`, when set,
    /// restricts the page to exact matches.
    #[derive(Clone, PartialEq, prost::Message)]
    pub struct ListProductsRequest {
        #[prost(int64, tag = "1")]
        pub limit: i64,
        #[prost(uint64, tag = "2")]
        pub offset: u64,
        #[prost(string, optional, tag = "3")]
        pub category_id: Option<String>,
    }

    #[derive(Clone, PartialEq, prost::Message)]
    pub struct ListProductsResponse {
        #[prost(message, repeated, tag = "1")]
        pub products: Vec<ProductResponse>,
    }

    #[derive(Clone, PartialEq, prost::Message)]
    pub struct UpdateStockRequest {
        #[prost(string, tag = "1")]
        pub id: String,
        #[prost(int32, tag = "2")]
        pub stock: i32,
    }

    #[derive(Clone, PartialEq, prost::Message)]
    pub struct DeleteProductResponse {}

    include!(concat!(env!("OUT_DIR"), "/inventory.InventoryService.rs"));

    pub use inventory_service_client::InventoryServiceClient;
    pub use inventory_service_server::{InventoryService, InventoryServiceServer};
}

#[cfg(test)]
mod tests {
    use super::inventory::*;
    use prost::Message;

    #[test]
    fn test_optional_category_is_omitted_when_unset() {
        let unfiltered = ListProductsRequest {
            limit: 10,
            offset: 0,
            category_id: None,
        };
        let decoded = ListProductsRequest::decode(unfiltered.encode_to_vec().as_slice()).unwrap();
        assert_eq!(decoded.category_id, None);

        let filtered = ListProductsRequest {
            category_id: Some(String::new()),
            ..unfiltered
        };
        let decoded = ListProductsRequest::decode(filtered.encode_to_vec().as_slice()).unwrap();
        assert_eq!(decoded.category_id, Some(String::new()));
    }
}
