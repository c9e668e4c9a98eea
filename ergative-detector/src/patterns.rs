//! Structural verification of a marker found by the first pass.
//!
//! Urdu is split-ergative: the subject of a perfective transitive verb takes
//! the ergative postposition and the verb agrees with its object instead. A
//! `نے` marker is only trusted when the parse shows that configuration. A `سے`
//! marker is trusted when some non-perfective verb has a nominative subject or
//! an oblique argument with something attached to it.

use crate::classifier::CaseLabel;
use crate::error::{DetectError, FeatureFormatError};
use crate::features::{get_features, keys};
use crate::markers::Marker;
use crate::token::{Sentence, Token};
use crate::tree::ChildIndex;

/// The node verb-level rules apply to. A compound-verb component is
/// analysed through its head.
pub fn effective_verb_id(token: &Token) -> usize {
    if token.deprel.contains("compound") {
        token.head
    } else {
        token.id
    }
}

/// Route the sentence to one structural check based on the markers seen.
///
/// A volitional marker always wins: when both kinds are present only the
/// ergative pattern is tried.
pub fn check_pattern(sentence: &Sentence, markers: &[Marker]) -> Result<CaseLabel, DetectError> {
    let has_vol = markers.contains(&Marker::Volitional);
    let has_nvol = markers.contains(&Marker::NonVolitional);
    if !has_vol && !has_nvol {
        return Ok(CaseLabel::Other);
    }

    let index = ChildIndex::build(sentence)?;

    if has_vol {
        let label = ergative_pattern(sentence, &index)?;
        assert!(
            matches!(label, CaseLabel::Vol | CaseLabel::Other),
            "ergative pattern produced {label}"
        );
        return Ok(label);
    }

    let label = absolutive_pattern(sentence, &index)?;
    assert!(
        matches!(label, CaseLabel::Nvol | CaseLabel::Other),
        "absolutive pattern produced {label}"
    );
    Ok(label)
}

/// Look for a perfective (or infinitival) verb whose subject is not
/// nominative and whose object, if any, agrees with it.
///
/// A subject with no `Case` feature at all counts as non-nominative.
pub fn ergative_pattern(
    sentence: &Sentence,
    index: &ChildIndex<'_>,
) -> Result<CaseLabel, FeatureFormatError> {
    for word in sentence.iter_words() {
        if !word.upos.contains("VERB") || !word.has_feats() {
            continue;
        }
        let verb_feats = get_features(word)?;
        let infinitive = verb_feats.has(keys::VERB_FORM, "Inf");
        if !verb_feats.has(keys::ASPECT, "Perf") && !infinitive {
            continue;
        }

        let verb_id = effective_verb_id(word);
        let mut subject_found = false;
        let mut object_found = false;
        let mut object_agreement = false;

        for child in index.children_of(verb_id) {
            // modal: infinitive governed by an auxiliary
            if infinitive && child.upos.contains("AUX") {
                log::debug!(
                    "verb {} is an infinitive with auxiliary {}: VOL",
                    word.id,
                    child.id
                );
                return Ok(CaseLabel::Vol);
            }

            let is_subject = child.deprel.contains("nsubj");
            let is_object = child.deprel.contains("obj");
            if !is_subject && !is_object {
                continue;
            }
            let child_feats = get_features(child)?;

            let case = child_feats.value_or_empty(keys::CASE);
            if is_subject && (case.contains("Acc") || !case.contains("Nom")) {
                subject_found = true;
            }

            if is_object {
                object_found = true;
                if verb_feats.get(keys::GENDER) == child_feats.get(keys::GENDER)
                    && verb_feats.get(keys::NUMBER) == child_feats.get(keys::NUMBER)
                {
                    object_agreement = true;
                }
            }
        }

        log::trace!(
            "verb {} (node {verb_id}): subject={subject_found} object={object_found} agreement={object_agreement}",
            word.id
        );
        if subject_found && (object_agreement || !object_found) {
            log::debug!("verb {} shows the ergative pattern: VOL", word.id);
            return Ok(CaseLabel::Vol);
        }
    }

    Ok(CaseLabel::Other)
}

/// Look for a non-perfective verb with a nominative subject, or with an
/// oblique argument that has its own dependents. The first hit decides.
pub fn absolutive_pattern(
    sentence: &Sentence,
    index: &ChildIndex<'_>,
) -> Result<CaseLabel, FeatureFormatError> {
    for word in sentence.iter_words() {
        if !word.upos.contains("VERB") || !word.has_feats() {
            continue;
        }
        if get_features(word)?.has(keys::ASPECT, "Perf") {
            continue;
        }

        let verb_id = effective_verb_id(word);
        for child in index.children_of(verb_id) {
            if child.deprel.contains("nsubj")
                && get_features(child)?
                    .value_or_empty(keys::CASE)
                    .contains("Nom")
            {
                log::debug!(
                    "verb {} has nominative subject {}: NVOL",
                    word.id,
                    child.id
                );
                return Ok(CaseLabel::Nvol);
            }

            if child.deprel.contains("obl") && index.has_children(child.id) {
                log::debug!(
                    "verb {} has oblique {} with attached dependents: NVOL",
                    word.id,
                    child.id
                );
                return Ok(CaseLabel::Nvol);
            }
        }
    }

    Ok(CaseLabel::Other)
}
