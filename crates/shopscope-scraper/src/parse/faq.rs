use std::collections::HashSet;
use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use shopscope_core::QaPair;

use super::dom::{collapsed_text, has_class_matching, selector, CLASSED};
use crate::rules::ExtractionRules;

static HEADINGS: LazyLock<Selector> = LazyLock::new(|| selector("h2, h3, h4, h5, h6"));

/// Question/answer pairs from FAQ containers.
///
/// Two passes run over each outermost container and their results are
/// concatenated: question-class and answer-class elements paired by
/// position, then every `h2`-`h6` containing `?` paired with its next
/// `p`/`div` sibling. A pair found by both passes appears twice.
#[must_use]
pub fn parse_faqs(document: &Html, rules: &ExtractionRules) -> Vec<QaPair> {
    let containers: Vec<ElementRef<'_>> = document
        .select(&CLASSED)
        .filter(|el| has_class_matching(*el, &rules.faq_container_class))
        .collect();
    let container_ids: HashSet<_> = containers.iter().map(|c| c.id()).collect();

    let mut faqs = Vec::new();
    for container in containers {
        // `accordion-header` and friends match the container pattern too.
        if container
            .ancestors()
            .any(|ancestor| container_ids.contains(&ancestor.id()))
        {
            continue;
        }
        faqs.extend(paired_by_class(container, rules));
        faqs.extend(paired_by_heading(container));
    }
    faqs
}

fn paired_by_class(container: ElementRef<'_>, rules: &ExtractionRules) -> Vec<QaPair> {
    let questions = container
        .select(&CLASSED)
        .filter(|el| has_class_matching(*el, &rules.faq_question_class));
    let answers = container
        .select(&CLASSED)
        .filter(|el| has_class_matching(*el, &rules.faq_answer_class));

    questions
        .zip(answers)
        .filter_map(|(q, a)| pair(collapsed_text(q), collapsed_text(a)))
        .collect()
}

fn paired_by_heading(container: ElementRef<'_>) -> Vec<QaPair> {
    container
        .select(&HEADINGS)
        .filter_map(|heading| {
            let question = collapsed_text(heading);
            if !question.contains('?') {
                return None;
            }
            let answer = heading
                .next_siblings()
                .filter_map(ElementRef::wrap)
                .find(|sibling| matches!(sibling.value().name(), "p" | "div"))?;
            pair(question, collapsed_text(answer))
        })
        .collect()
}

fn pair(question: String, answer: String) -> Option<QaPair> {
    (!question.is_empty() && !answer.is_empty()).then_some(QaPair { question, answer })
}
