//! gRPC service implementation for `inventory.InventoryService`

use domain_products::{NewProduct, Product, ProductError, ProductRepository, ProductService};
use rpc::inventory::{
    DeleteProductResponse, InventoryService, ListProductsRequest, ListProductsResponse, ProductId,
    ProductRequest, ProductResponse, UpdateStockRequest,
};
use tonic::{Request, Response, Status};
use validator::Validate;

/// gRPC twin of the HTTP product handlers, over the same service.
pub struct InventoryGrpcService<R: ProductRepository> {
    service: ProductService<R>,
}

impl<R: ProductRepository> InventoryGrpcService<R> {
    pub fn new(service: ProductService<R>) -> Self {
        Self { service }
    }
}

fn to_status(err: ProductError) -> Status {
    match err {
        ProductError::NotFound(id) => Status::not_found(format!("Product {id} not found")),
        ProductError::Validation(msg) => Status::invalid_argument(msg),
        ProductError::Persistence(msg) => {
            tracing::error!(error = %msg, "Product store failure");
            Status::internal("Internal storage error")
        }
    }
}

fn product_to_proto(product: Product) -> ProductResponse {
    ProductResponse {
        id: product.id,
        name: product.name,
        description: product.description,
        price: product.price,
        stock: product.stock,
        category_id: product.category_id,
    }
}

#[tonic::async_trait]
impl<R: ProductRepository + 'static> InventoryService for InventoryGrpcService<R> {
    async fn add_product(
        &self,
        request: Request<ProductRequest>,
    ) -> Result<Response<ProductResponse>, Status> {
        let req = request.into_inner();
        let draft = NewProduct {
            name: req.name,
            description: req.description,
            price: req.price,
            stock: req.stock,
            category_id: req.category_id,
        };
        draft
            .validate()
            .map_err(|e| to_status(ProductError::from(e)))?;

        let product = self.service.add_product(draft).await.map_err(to_status)?;
        Ok(Response::new(product_to_proto(product)))
    }

    async fn get_product(
        &self,
        request: Request<ProductId>,
    ) -> Result<Response<ProductResponse>, Status> {
        let id = request.into_inner().id;
        let product = self.service.get_product(&id).await.map_err(to_status)?;
        Ok(Response::new(product_to_proto(product)))
    }

    async fn list_products(
        &self,
        request: Request<ListProductsRequest>,
    ) -> Result<Response<ListProductsResponse>, Status> {
        let req = request.into_inner();
        let products = match req.category_id {
            Some(category_id) => {
                self.service
                    .list_by_category(&category_id, req.limit, req.offset)
                    .await
            }
            None => self.service.list_products(req.limit, req.offset).await,
        }
        .map_err(to_status)?;

        Ok(Response::new(ListProductsResponse {
            products: products.into_iter().map(product_to_proto).collect(),
        }))
    }

    async fn update_stock(
        &self,
        request: Request<UpdateStockRequest>,
    ) -> Result<Response<ProductResponse>, Status> {
        let req = request.into_inner();
        let product = self
            .service
            .update_stock(&req.id, req.stock)
            .await
            .map_err(to_status)?;
        Ok(Response::new(product_to_proto(product)))
    }

    async fn delete_product(
        &self,
        request: Request<ProductId>,
    ) -> Result<Response<DeleteProductResponse>, Status> {
        let id = request.into_inner().id;
        self.service.delete_product(&id).await.map_err(to_status)?;
        Ok(Response::new(DeleteProductResponse {}))
    }
}
