//! Utils

use clap::Parser;

/// Arguments for the checkout demo
#[derive(Debug, Parser)]
pub struct DemoCheckoutArgs {
    /// Fixture set to load the catalog and shipping options from
    #[clap(short, long, default_value = "handwoven")]
    pub fixture: String,

    /// Shipping method id
    #[clap(short, long, default_value = "standard")]
    pub shipping: String,
}

/// Arguments for the donation demo
#[derive(Debug, Parser)]
pub struct DemoDonationArgs {
    /// Donation amount (e.g. "1000.00")
    #[clap(short, long, default_value = "1000.00")]
    pub amount: String,

    /// ISO currency code
    #[clap(short, long, default_value = "PHP")]
    pub currency: String,
}
