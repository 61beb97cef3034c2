//! Outbound notification helpers.
//!
//! Every send here is best-effort: a failed delivery is logged and never
//! fails the operation that triggered it.

use fedem_core::{Email, EmailClient, ShipmentDetails, Username};

pub async fn send_welcome_email<E: EmailClient>(client: &E, recipient: &Email, username: &Username) {
    let content = format!(
        "Hi {username},\n\nWelcome to Fedemdelivery! Your account is ready.\n"
    );
    send_best_effort(client, recipient, "Welcome to Fedemdelivery!", &content, "welcome").await;
}

pub async fn send_reset_email<E: EmailClient>(
    client: &E,
    recipient: &Email,
    username: &Username,
    reset_url: &str,
) {
    let content = format!(
        "Hi {username},\n\nA password reset was requested for your account. \
         Follow this link within the next hour to choose a new password:\n\n{reset_url}\n\n\
         If you did not request this, you can ignore this message.\n"
    );
    send_best_effort(client, recipient, "Password Reset Request", &content, "reset").await;
}

/// Payment-detail requests go to the operator inbox, not the customer.
pub async fn send_payment_email<E: EmailClient>(
    client: &E,
    operator: &Email,
    username: &Username,
    customer_email: &str,
    details: &ShipmentDetails,
) {
    let content = format!(
        "Payment details requested by {username} ({customer_email}):\n\n\
         Country: {}\nWeight: {}\nShipment type: {}\nTotal price: {}\n",
        details.country, details.weight, details.shipment_type, details.total_price
    );
    send_best_effort(client, operator, "Payment details Request", &content, "payment").await;
}

pub async fn send_tracking_email<E: EmailClient>(
    client: &E,
    recipient: &Email,
    username: &Username,
    tracking_id: &str,
    details: &ShipmentDetails,
) {
    let content = format!(
        "Hi {username},\n\nYour shipment has been registered.\n\n\
         Tracking ID: {tracking_id}\nCountry: {}\nWeight: {}\nShipment type: {}\n",
        details.country, details.weight, details.shipment_type
    );
    send_best_effort(client, recipient, "Your Tracking ID", &content, "tracking").await;
}

async fn send_best_effort<E: EmailClient>(
    client: &E,
    recipient: &Email,
    subject: &str,
    content: &str,
    kind: &str,
) {
    if let Err(error) = client.send_email(recipient, subject, content).await {
        tracing::warn!(kind, %error, "failed to send notification email");
    }
}
