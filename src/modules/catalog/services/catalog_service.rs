use std::collections::HashMap;

use tracing::info;

use crate::core::{money, AppError, Result};
use crate::modules::catalog::models::{
    AttributeDef, AttributeValueInput, CreateAttributeRequest, CreateOptionRequest,
    CreateProductRequest, CreateProductTypeRequest, FieldKind, ProductDetail, ProductType,
    ProductTypeDetail, UpdateProductRequest,
};
use crate::modules::catalog::repositories::{ProductRepository, ProductTypeRepository};

/// Business logic for the product catalog
pub struct CatalogService {
    products: ProductRepository,
    types: ProductTypeRepository,
}

impl CatalogService {
    pub fn new(products: ProductRepository, types: ProductTypeRepository) -> Self {
        Self { products, types }
    }

    // Product types

    pub async fn create_product_type(
        &self,
        request: CreateProductTypeRequest,
    ) -> Result<ProductType> {
        if request.name.trim().is_empty() {
            return Err(AppError::validation("Product type name is required"));
        }

        self.types.create(request.name.trim()).await
    }

    pub async fn list_product_types(&self) -> Result<Vec<ProductType>> {
        self.types.list().await
    }

    pub async fn get_product_type(&self, id: i64) -> Result<ProductTypeDetail> {
        let product_type = self
            .types
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Product type {}", id)))?;

        let attributes = self.types.attributes_for_type(id).await?;

        Ok(ProductTypeDetail {
            id: product_type.id,
            name: product_type.name,
            attributes,
        })
    }

    /// Delete a product type. Rejected while products of this type exist,
    /// with a descriptive message instead of a bare constraint error.
    pub async fn delete_product_type(&self, id: i64) -> Result<()> {
        self.types
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Product type {}", id)))?;

        let in_use = self.types.count_products(id).await?;
        if in_use > 0 {
            return Err(AppError::conflict(format!(
                "Cannot delete this product type: {} product(s) still use it",
                in_use
            )));
        }

        self.types.delete(id).await
    }

    pub async fn add_attribute(
        &self,
        product_type_id: i64,
        request: CreateAttributeRequest,
    ) -> Result<ProductTypeDetail> {
        self.types
            .find_by_id(product_type_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Product type {}", product_type_id)))?;

        if request.name.trim().is_empty() {
            return Err(AppError::validation("Attribute name is required"));
        }

        self.types
            .add_attribute(
                product_type_id,
                request.name.trim(),
                request.field_kind.as_str(),
            )
            .await?;

        self.get_product_type(product_type_id).await
    }

    pub async fn remove_attribute(&self, attribute_id: i64) -> Result<()> {
        self.types
            .find_attribute(attribute_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Attribute {}", attribute_id)))?;

        self.types.delete_attribute(attribute_id).await
    }

    /// Add an option to a Selection attribute
    pub async fn add_option(
        &self,
        attribute_id: i64,
        request: CreateOptionRequest,
    ) -> Result<AttributeDef> {
        let attribute = self
            .types
            .find_attribute(attribute_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Attribute {}", attribute_id)))?;

        if attribute.field_kind != FieldKind::Selection {
            return Err(AppError::validation(format!(
                "Attribute '{}' is not a selection attribute",
                attribute.name
            )));
        }

        if request.value.trim().is_empty() {
            return Err(AppError::validation("Option value is required"));
        }

        self.types
            .add_option(attribute_id, request.value.trim())
            .await?;

        self.types
            .find_attribute(attribute_id)
            .await?
            .ok_or_else(|| AppError::internal("Attribute vanished after update"))
    }

    // Products

    pub async fn create_product(&self, request: CreateProductRequest) -> Result<ProductDetail> {
        self.validate_product_fields(&request.name, request.price, request.stock)?;

        self.types
            .find_by_id(request.product_type_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Product type {}", request.product_type_id))
            })?;

        self.validate_attribute_values(request.product_type_id, &request.attributes)
            .await?;

        let product = self
            .products
            .create(
                request.name.trim(),
                request.description.as_deref(),
                request.price,
                request.stock,
                request.product_type_id,
                &request.attributes,
            )
            .await?;

        info!(product_id = product.id, "Product created");

        self.get_product(product.id).await
    }

    pub async fn get_product(&self, id: i64) -> Result<ProductDetail> {
        let product = self
            .products
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Product {}", id)))?;

        let attributes = self.products.values_for_product(id).await?;

        Ok(ProductDetail {
            product,
            attributes,
        })
    }

    pub async fn list_products(&self) -> Result<Vec<ProductDetail>> {
        let products = self.products.list().await?;

        let mut details = Vec::with_capacity(products.len());
        for product in products {
            let attributes = self.products.values_for_product(product.id).await?;
            details.push(ProductDetail {
                product,
                attributes,
            });
        }

        Ok(details)
    }

    pub async fn update_product(
        &self,
        id: i64,
        request: UpdateProductRequest,
    ) -> Result<ProductDetail> {
        let product = self
            .products
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Product {}", id)))?;

        self.validate_product_fields(&request.name, request.price, request.stock)?;
        self.validate_attribute_values(product.product_type_id, &request.attributes)
            .await?;

        self.products
            .update(
                id,
                request.name.trim(),
                request.description.as_deref(),
                request.price,
                request.stock,
                &request.attributes,
            )
            .await?;

        self.get_product(id).await
    }

    /// Delete a product. Rejected while sale line items reference it, so
    /// historical sales keep their product links intact.
    pub async fn delete_product(&self, id: i64) -> Result<()> {
        self.products
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Product {}", id)))?;

        let refs = self.products.count_line_item_refs(id).await?;
        if refs > 0 {
            return Err(AppError::conflict(format!(
                "Cannot delete this product: it appears in {} sale line item(s)",
                refs
            )));
        }

        self.products.delete(id).await
    }

    fn validate_product_fields(
        &self,
        name: &str,
        price: rust_decimal::Decimal,
        stock: i32,
    ) -> Result<()> {
        if name.trim().is_empty() {
            return Err(AppError::validation("Product name is required"));
        }

        money::validate_amount(price).map_err(AppError::validation)?;

        if stock < 0 {
            return Err(AppError::validation("Stock cannot be negative"));
        }

        Ok(())
    }

    /// Every submitted value must reference an attribute of the product's
    /// type and satisfy the attribute's kind
    async fn validate_attribute_values(
        &self,
        product_type_id: i64,
        values: &[AttributeValueInput],
    ) -> Result<()> {
        let defs = self.types.attributes_for_type(product_type_id).await?;
        let by_id: HashMap<i64, &AttributeDef> = defs.iter().map(|d| (d.id, d)).collect();

        for value in values {
            let def = by_id.get(&value.attribute_id).ok_or_else(|| {
                AppError::validation(format!(
                    "Attribute {} does not belong to this product type",
                    value.attribute_id
                ))
            })?;

            def.validate_value(&value.value)?;
        }

        Ok(())
    }
}
