pub mod commit;
pub mod health;
pub mod inspect;
