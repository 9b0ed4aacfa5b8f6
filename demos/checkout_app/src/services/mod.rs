// demos/checkout_app/src/services/mod.rs
pub mod cart_repository;
pub mod checkout_service;
pub mod order_gateway;
pub mod wishlist_repository;
