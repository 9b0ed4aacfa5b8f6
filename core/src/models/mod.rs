// ornament_pricing/src/models/mod.rs

//! Plain data the pricing engine reads and produces.

pub mod buyer;
pub mod item;
pub mod line_item;
pub mod order;
pub mod payment;
pub mod rental;
pub mod shipping;

pub use buyer::BuyerDetails;
pub use item::OrderableItem;
pub use line_item::LineItem;
pub use order::{OrderLine, OrderPayload, OrderStatus, ShippingDetails};
pub use payment::{PaymentMethod, PaymentOption, PaymentStatus, ResolvedPayment};
pub use rental::{RentalTerms, RentalWindow};
pub use shipping::ShippingMethod;
