pub mod db;
pub mod listingdb;
pub mod offerdb;
pub mod paymentdb;
pub mod propertydb;
pub mod reviewdb;
pub mod userdb;
pub mod wishlistdb;
