//! Built-in default question/answer pairs.
//!
//! Used when no knowledge CSV exists on disk, so the assistant is usable
//! out of the box.

/// The default knowledge set as (question, answer) pairs.
pub const DEFAULT_FAQ: &[(&str, &str)] = &[
    (
        "What are your working hours?",
        "Our office is open from 9 AM to 6 PM, Monday to Friday.",
    ),
    (
        "Do you work on weekends?",
        "No, we are closed on Saturdays and Sundays.",
    ),
    (
        "How can I reset my password?",
        "Click on 'Forgot Password' at login and follow the steps to reset your password.",
    ),
    (
        "Can I change my registered email address?",
        "Yes, go to Account Settings and update your email under Profile Information.",
    ),
    (
        "Do you offer international shipping?",
        "Yes, we ship worldwide with additional charges depending on the region.",
    ),
    (
        "How long does delivery take within India?",
        "Delivery usually takes 3–5 business days.",
    ),
    (
        "How long does international delivery take?",
        "International delivery can take 7–15 business days depending on location.",
    ),
    (
        "How can I contact support?",
        "You can email us at support@example.com or call +1-234-567-890.",
    ),
    (
        "Where is your company located?",
        "We are headquartered in New Delhi, India, with offices in Bangalore and Mumbai.",
    ),
    (
        "Do you provide refunds?",
        "Yes, refunds can be requested within 14 days of purchase subject to our refund policy.",
    ),
    (
        "How do I track my order?",
        "Go to 'My Orders' and click 'Track Order' for real-time updates.",
    ),
    (
        "What payment methods are accepted?",
        "We accept credit cards, debit cards, UPI, PayPal, and bank transfers.",
    ),
    (
        "Is cash on delivery available?",
        "Yes, Cash on Delivery is available for select regions in India.",
    ),
    (
        "Is my personal data secure?",
        "Yes, we use industry-standard encryption and comply with relevant privacy regulations.",
    ),
    (
        "Do you provide warranty on products?",
        "Yes, most products come with a 1-year manufacturer’s warranty.",
    ),
    (
        "Can I cancel my order?",
        "Yes, you can cancel before the order is shipped. After shipping, cancellation is not possible.",
    ),
    (
        "Do you have a mobile app?",
        "Yes, our app is available on both iOS and Android platforms.",
    ),
    (
        "Do you provide bulk discounts?",
        "Yes, we provide discounts for bulk and corporate orders. Contact sales@example.com.",
    ),
    (
        "What should I do if I receive a damaged product?",
        "Please raise a support ticket within 48 hours with photos, and we will arrange a replacement.",
    ),
    (
        "Do you offer internships?",
        "Yes, we offer internships in software, data science, and marketing. Openings are posted on our Careers page.",
    ),
    (
        "How do I apply for a job?",
        "Visit our Careers page and apply through the online portal.",
    ),
    (
        "Do you offer customer loyalty rewards?",
        "Yes, we have a points-based loyalty program where every purchase earns you reward points.",
    ),
    (
        "How do I redeem reward points?",
        "You can redeem points at checkout for discounts on future purchases.",
    ),
    (
        "What if I forgot my username?",
        "Use your registered email address as your username or request help from support.",
    ),
    (
        "How can I delete my account?",
        "Go to Account Settings → Privacy → Delete Account. This is permanent and cannot be undone.",
    ),
];
