//! Scripted checkout through the simulated payment processor.

use tracing::info;

use kalartz_core::{PaymentMethod, ProductId, Role};
use kalartz_storefront::Storefront;
use kalartz_storefront::catalog::Catalog;
use kalartz_storefront::config::StorefrontConfig;
use kalartz_storefront::payment::SimulatedGateway;
use kalartz_storefront::session::{IdentityDirectory, MemoryStore, SessionState};

use super::CommandError;

/// Arguments of the `checkout` command.
#[derive(Debug)]
pub struct CheckoutArgs {
    pub email: String,
    pub role: Role,
    pub password: String,
    /// One entry per unit; repeated IDs add more units of the same product.
    pub products: Vec<i32>,
    pub method: PaymentMethod,
}

/// Sign in, fill the cart, and pay.
///
/// # Errors
///
/// Returns an error if a product ID is unknown, sign-in fails, or the payment
/// is declined or times out.
pub async fn run(config: StorefrontConfig, args: CheckoutArgs) -> Result<(), CommandError> {
    let catalog = Catalog::demo();
    let gateway = SimulatedGateway::from_config(&config.payment);
    let session = SessionState::new(IdentityDirectory::with_demo_accounts(), MemoryStore::new());
    let currency = config.currency;
    let storefront = Storefront::new(config, session, gateway);

    for id in &args.products {
        let product = catalog
            .get(ProductId::new(*id))
            .ok_or(CommandError::UnknownProduct(*id))?;
        storefront.add_item(product);
    }

    let identity = storefront.login(&args.email, &args.password, args.role)?;
    info!(email = %identity.email, dashboard = storefront.dashboard().title(), "Signed in");

    let cart = storefront.cart_view();
    for line in &cart.items {
        info!(
            name = %line.name,
            quantity = line.quantity,
            price = %line.price,
            line_price = %line.line_price,
            "Cart line"
        );
    }
    info!(items = cart.item_count, subtotal = %cart.subtotal, method = %args.method, "Checking out");

    let receipt = storefront.checkout(args.method).await?;
    info!(
        payment_id = %receipt.payment_id,
        order_id = %receipt.order_id,
        amount = %receipt.amount.display(currency),
        items = receipt.item_count,
        "Payment confirmed"
    );
    Ok(())
}
