pub mod employee;
pub mod inspection;
pub mod movement;
pub mod ppe_item;
pub mod settings;
pub mod whitelist;
