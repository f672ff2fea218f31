/// Canned replies keyed by keywords, checked in order.
///
/// A rule matches when the lower-cased message contains any of its keywords as a
/// substring, so `"hi"` also matches inside `"this"`.
const RULES: &[(&[&str], &str)] = &[
    (
        &["hello", "hi"],
        "Hello! I'm Clairvyn, your AI architecture assistant. How can I help you design your floor plan today?",
    ),
    (
        &["floor plan", "floorplan"],
        "Great! I can help you design floor plans. What type of space are you working with? (e.g., kitchen, living room, office, etc.)",
    ),
    (
        &["kitchen"],
        "Kitchens are my specialty! I can help you optimize your kitchen layout. What's your current kitchen size and what appliances do you need to accommodate?",
    ),
    (
        &["bedroom"],
        "Bedroom design is important for comfort and functionality. How many bedrooms do you need, and what's the approximate square footage?",
    ),
    (
        &["bathroom"],
        "Bathroom layouts require careful planning for plumbing and fixtures. Are you designing a full bathroom, half bath, or master suite bathroom?",
    ),
    (
        &["living room", "livingroom"],
        "Living rooms are the heart of the home! What's your vision for the space? Do you need seating for a specific number of people?",
    ),
    (
        &["office", "workspace"],
        "Home offices need good lighting and ergonomic design. Will this be a dedicated office space or a multi-purpose room?",
    ),
    (
        &["dimensions", "size", "measurements"],
        "I can help you with room dimensions and measurements. What specific space are you looking to measure or design?",
    ),
    (
        &["furniture", "layout"],
        "Furniture layout is crucial for flow and functionality. What type of room are you furnishing, and what are your main pieces?",
    ),
    (
        &["cad", "drawing"],
        "I can help you with CAD drawings and technical specifications. What type of drawing do you need - floor plan, elevation, or detail?",
    ),
    (
        &["help", "assist"],
        "I'm here to help with all your architectural design needs! I can assist with floor plans, room layouts, furniture placement, CAD drawings, and more. What would you like to work on?",
    ),
    (
        &["bigger", "smaller", "extend", "shrink"],
        "I can adjust the dimensions for you. Which specific element or room would you like to resize?",
    ),
    (
        &["add", "create", "place"],
        "I can add that to your design. Where would you like it placed?",
    ),
    (
        &["remove", "delete"],
        "I can help remove items from your plan. What needs to be taken out?",
    ),
    (
        &["door", "window", "wall"],
        "I can modify the architectural elements. Do you have specific dimensions in mind?",
    ),
];

pub const DEFAULT_REPLY: &str = "I'm sorry, I didn't quite catch that. Could you please rephrase or check for typos? I can help with floor plans, layouts, and CAD designs.";

#[derive(Debug, Default, Clone, Copy)]
pub struct FallbackResponder;

impl FallbackResponder {
    #[must_use]
    pub fn respond(&self, message: &str) -> &'static str {
        let message = message.to_lowercase();
        RULES
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|keyword| message.contains(keyword)))
            .map_or(DEFAULT_REPLY, |&(_, reply)| reply)
    }
}
