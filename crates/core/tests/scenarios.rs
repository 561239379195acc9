//! End-to-end widget scenarios driven through a headless view.

use reserva::{prelude::*, store::MockReservationStore};
use testresult::TestResult;

fn contact() -> ContactDetails {
    ContactDetails {
        customer_name: "Lucía Fernández".to_string(),
        customer_phone: "11 4444-1234".to_string(),
        comments: "Retiro a las 20hs".to_string(),
    }
}

fn widget(store: MockReservationStore) -> ReservationWidget<MockReservationStore, HeadlessView> {
    ReservationWidget::new(store, HeadlessView::new())
}

#[test]
fn running_total_across_adds_and_quantity_changes() {
    let mut widget = widget(MockReservationStore::new());

    widget.on_add_product("Empanada", "500");

    assert_eq!(widget.cart().total(), 500);

    widget.on_add_product("Milanesa", "1200");
    widget.on_quantity_change("Milanesa", "3");

    assert_eq!(widget.cart().total(), 4100);
    assert_eq!(
        widget.view().total,
        CurrencyFormatter::default().format_total(4100)
    );
}

#[test]
fn removing_the_only_product_empties_the_cart() {
    let mut widget = widget(MockReservationStore::new());

    widget.on_add_product("Empanada", "500");
    widget.on_remove_product("Empanada");

    assert!(widget.cart().is_empty());
    assert_eq!(widget.cart().total(), 0);
    assert!(widget.view().empty_state_visible);
}

#[tokio::test]
async fn submitting_an_empty_cart_warns_without_calling_the_store() {
    let mut store = MockReservationStore::new();
    store.expect_create_reservation().never();

    let mut widget = widget(store);

    let outcome = widget.on_submit(contact()).await;

    assert_eq!(outcome, SubmissionOutcome::EmptyCart);
    assert_eq!(widget.submission_state(), SubmissionState::Idle);
    assert_eq!(
        widget.submission_transitions(),
        [SubmissionState::Validating, SubmissionState::Idle]
    );
    assert_eq!(
        widget.view().warnings,
        ["Por favor, agrega al menos un producto a tu reserva."]
    );
    assert!(widget.view().submit_enabled);
}

#[tokio::test]
async fn successful_submit_shows_confirmation() -> TestResult {
    let mut store = MockReservationStore::new();
    let expected_total = CurrencyFormatter::default().format_total(500);

    store
        .expect_create_reservation()
        .once()
        .withf(move |request| {
            request.product_lines() == ["1 x Empanada"]
                && request.total_display() == expected_total
                && request.customer_name() == "Lucía Fernández"
                && request.customer_phone() == "11 4444-1234"
                && request.comments() == "Retiro a las 20hs"
        })
        .return_once(|_| Ok(ReservationId::new("0192f3a1")));

    let mut widget = widget(store);
    widget.on_add_product("Empanada", "500");

    let outcome = widget.on_submit(contact()).await;

    assert_eq!(outcome, SubmissionOutcome::Submitted(ReservationId::new("0192f3a1")));
    assert_eq!(widget.submission_state(), SubmissionState::Succeeded);
    assert_eq!(
        widget.submission_transitions(),
        [
            SubmissionState::Validating,
            SubmissionState::Submitting,
            SubmissionState::Succeeded
        ]
    );

    let view = widget.view();

    assert!(view.confirmation_visible);
    assert!(!view.form_visible);
    assert!(view.errors.is_empty());

    Ok(())
}

#[tokio::test]
async fn failed_submit_returns_to_idle_and_keeps_the_cart() -> TestResult {
    let mut store = MockReservationStore::new();

    store
        .expect_create_reservation()
        .once()
        .return_once(|_| Err(ReservationStoreError::Rejected("UNAVAILABLE".to_string())));

    let mut widget = widget(store);
    widget.on_add_product("Empanada", "500");

    let outcome = widget.on_submit(contact()).await;

    assert_eq!(outcome, SubmissionOutcome::Failed);
    assert_eq!(
        widget.submission_transitions(),
        [
            SubmissionState::Validating,
            SubmissionState::Submitting,
            SubmissionState::Failed,
            SubmissionState::Idle
        ]
    );

    let view = widget.view();

    assert!(view.submit_enabled);
    assert_eq!(view.submit_label, "Enviar Reserva");
    assert_eq!(
        view.errors,
        ["Hubo un error al enviar tu reserva. Por favor, intenta de nuevo."]
    );
    assert!(!view.confirmation_visible);
    assert!(
        view.errors.iter().all(|e| !e.contains("UNAVAILABLE")),
        "store detail must not reach the user"
    );

    assert_eq!(widget.cart().len(), 1);
    assert_eq!(
        widget.cart().get("Empanada").map(CartEntry::quantity),
        Some(1)
    );

    Ok(())
}
