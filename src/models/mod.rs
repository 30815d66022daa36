pub mod card;
pub mod checkout;
pub mod festa;
pub mod mp_paym;
pub mod payment;
pub mod resale;
