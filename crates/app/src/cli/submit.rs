use clap::Args;
use reserva::prelude::*;
use reserva_app::{
    config::{FirestoreConfig, SubmissionConfig},
    firestore::FirestoreClient,
};
use tracing::info;

/// Builds a cart from the command line and submits it as a reservation.
#[derive(Debug, Args)]
pub(crate) struct SubmitArgs {
    /// Product to add, as NAME=PRICE; repeat for more products
    #[arg(long = "product", value_name = "NAME=PRICE", required = true)]
    products: Vec<String>,

    /// Quantity for an added product, as NAME=QUANTITY
    #[arg(long = "quantity", value_name = "NAME=QUANTITY")]
    quantities: Vec<String>,

    /// Customer name
    #[arg(long)]
    name: String,

    /// Customer phone number
    #[arg(long)]
    phone: String,

    /// Free-form comments
    #[arg(long, default_value = "")]
    comments: String,

    #[command(flatten)]
    firestore: FirestoreConfig,

    #[command(flatten)]
    submission: SubmissionConfig,
}

pub(crate) async fn run(args: SubmitArgs) -> Result<(), String> {
    let controller = SubmissionController::new(FirestoreClient::new(args.firestore))
        .with_timeout(args.submission.submit_timeout());

    let mut widget =
        ReservationWidget::with_parts(controller, CurrencyFormatter::default(), HeadlessView::new());

    for product in &args.products {
        let (name, price) = split_pair(product)?;

        if !widget.on_add_product(name, price) {
            return Err(format!("could not add product {product:?}"));
        }
    }

    for quantity in &args.quantities {
        let (name, value) = split_pair(quantity)?;

        if !widget.on_quantity_change(name, value) {
            return Err(format!("could not set quantity {quantity:?}"));
        }
    }

    info!(
        entries = widget.cart().len(),
        total = widget.total_display(),
        "cart ready"
    );

    let contact = ContactDetails {
        customer_name: args.name,
        customer_phone: args.phone,
        comments: args.comments,
    };

    match widget.on_submit(contact).await {
        SubmissionOutcome::Submitted(id) => {
            println!("reservation_id: {id}");
            println!("total: {}", widget.total_display());

            for line in widget.cart().entries() {
                println!("  {}", line.describe());
            }

            Ok(())
        }
        SubmissionOutcome::EmptyCart => Err(last_message(&widget.view().warnings)),
        SubmissionOutcome::Failed => Err(last_message(&widget.view().errors)),
        SubmissionOutcome::Ignored => Err("submission ignored".to_string()),
    }
}

fn split_pair(raw: &str) -> Result<(&str, &str), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.trim(), value.trim()))
        .filter(|(key, value)| !key.is_empty() && !value.is_empty())
        .ok_or_else(|| format!("expected NAME=VALUE, got {raw:?}"))
}

fn last_message(messages: &[String]) -> String {
    messages
        .last()
        .cloned()
        .unwrap_or_else(|| "submission failed".to_string())
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn split_pair_trims_both_sides() -> TestResult {
        assert_eq!(split_pair(" Empanada = 500 ")?, ("Empanada", "500"));

        Ok(())
    }

    #[test]
    fn split_pair_keeps_equals_in_value() -> TestResult {
        assert_eq!(split_pair("Combo=1=2")?, ("Combo", "1=2"));

        Ok(())
    }

    #[test]
    fn split_pair_rejects_missing_parts() {
        for raw in ["Empanada", "=500", "Empanada="] {
            assert!(split_pair(raw).is_err(), "expected {raw:?} to be rejected");
        }
    }

    #[test]
    fn last_message_falls_back() {
        assert_eq!(last_message(&[]), "submission failed");
        assert_eq!(
            last_message(&["a".to_string(), "b".to_string()]),
            "b"
        );
    }
}
