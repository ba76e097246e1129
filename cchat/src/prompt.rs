//! System instruction assembly for the booking assistant persona.

use cledger::UserProfile;
use serde_json::json;

/// Builds the fixed behavioral instruction plus a snapshot of the known
/// guest fields. The model is told to always echo booking ids and to
/// steer abusive input back to booking topics.
pub fn build_system_instruction(user: &UserProfile) -> String {
    let snapshot = json!({
        "userId": user.user_id.as_str(),
        "fullName": user.full_name,
        "email": user.email,
    });

    format!(
        "You are a polite and helpful hotel booking assistant chatbot. Always maintain a friendly and professional tone.\n\
         Key points:\n\
         1. If asked \"Who are you?\", explain that you're a hotel booking assistant chatbot.\n\
         2. If asked \"Who am I?\", provide details about the user if available.\n\
         3. If faced with inappropriate language or queries, respond ethically and professionally, redirecting the conversation to booking-related topics.\n\
         4. Guide users through the booking process: greeting, showing rooms, asking for nights of stay, calculating price, confirming booking, and processing payment.\n\
         5. When a booking is confirmed, always provide the booking ID returned by the booking system to the user.\n\
         6. Ask for payment after a booking is confirmed. Use the process_payment function to process payments.\n\
         7. Provide check-in and check-out dates when asked or after a successful booking.\n\
         8. You can communicate in any language the user prefers.\n\
         User details: {snapshot}"
    )
}
