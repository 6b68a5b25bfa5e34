mod catalog;
mod filter;
mod tour;

pub use self::{
    catalog::Catalog,
    filter::{Activity, CatalogFilter, PriceBucket},
    tour::Tour,
};
