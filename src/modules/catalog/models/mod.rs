pub mod product;
pub mod product_type;

pub use product::{
    AttributeValue, AttributeValueInput, CreateProductRequest, Product, ProductDetail,
    UpdateProductRequest,
};
pub use product_type::{
    AttributeDef, AttributeOption, CreateAttributeRequest, CreateOptionRequest,
    CreateProductTypeRequest, FieldKind, ProductType, ProductTypeDetail,
};
