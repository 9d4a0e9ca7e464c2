pub mod offermodel;
pub mod paymentmodel;
pub mod propertymodel;
pub mod reviewmodel;
pub mod usermodel;
pub mod wishlistmodel;
