//! Built-in sample letter used by the command line `sample` command and the tests.

use crate::letter::{CoverLetter, Profile};

const SAMPLE_BODY: &str = concat!(
    "I am writing to apply for the Platform Engineer role at Northwind Labs. ",
    "Over the last four years I have built and operated the deployment tooling that ships ",
    "our product to more than two hundred customers.\n",
    "\n",
    "Highlights from that work:\n",
    "  - cut release lead time from two days to forty minutes\n",
    "  - moved the build fleet to reproducible, cached builds\n",
    "\n",
    "I would welcome the chance to bring the same care for reliable delivery to your team.",
);

/// Returns a fully populated sample letter.
pub fn sample_cover_letter() -> CoverLetter {
    CoverLetter::new(
        Profile {
            name: Some("Jordan Rivera".into()),
            position: Some("Platform Engineer".into()),
            email: Some("jordan.rivera@example.com".into()),
            phone: Some("+39 02 5550 1234".into()),
            location: Some("jordanrivera.dev".into()),
            company: Some("Northwind Labs".into()),
            hiring_manager: Some("Dear Ms. Okafor,".into()),
            closing: Some("Kind Regards,".into()),
            date: None,
        },
        Some(SAMPLE_BODY.to_owned()),
    )
}
