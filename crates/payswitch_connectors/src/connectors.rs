pub mod adyen;
pub mod authorizedotnet;
pub mod checkout;
pub mod cybersource;
pub mod nmi;
pub mod orbital;

pub use self::{
    adyen::Adyen, authorizedotnet::Authorizedotnet, checkout::Checkout, cybersource::Cybersource,
    nmi::Nmi, orbital::Orbital,
};
