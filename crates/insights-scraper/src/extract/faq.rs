use insights_core::Faq;
use scraper::{ElementRef, Html};

use crate::site::SiteRef;

use super::{element_text, MarkupExtractor};

/// Heading levels treated as questions.
const QUESTION_TAGS: [&str; 2] = ["h2", "h3"];
const ANSWER_TAG: &str = "p";

/// Question/answer pairs from the FAQ page.
///
/// Every `h2`/`h3` is a question; its answer is the next `<p>` anywhere after
/// it in document order. A heading with no following paragraph is dropped.
/// Consecutive headings share the same paragraph.
#[derive(Debug, Clone, Copy, Default)]
pub struct FaqPairs;

impl MarkupExtractor for FaqPairs {
    type Output = Vec<Faq>;

    fn path(&self) -> &str {
        "/pages/faq"
    }

    fn extract(&self, document: &Html, _site: &SiteRef) -> Self::Output {
        let elements: Vec<ElementRef<'_>> = document
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .collect();

        // Walk backwards so the nearest following paragraph is always known.
        let mut next_answer: Option<String> = None;
        let mut faqs = Vec::new();
        for element in elements.iter().rev() {
            let name = element.value().name();
            if name == ANSWER_TAG {
                next_answer = Some(element_text(element));
            } else if QUESTION_TAGS.contains(&name) {
                if let Some(answer) = &next_answer {
                    faqs.push(Faq {
                        question: element_text(element),
                        answer: answer.clone(),
                    });
                }
            }
        }
        faqs.reverse();
        faqs
    }
}
