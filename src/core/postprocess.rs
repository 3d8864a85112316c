use crate::domain::model::LabelList;

/// Index of the largest score. Ties go to the lowest index; a NaN counts as
/// the maximum so a broken output is reported rather than skipped.
pub fn argmax(scores: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (idx, &score) in scores.iter().enumerate() {
        match best {
            None => best = Some((idx, score)),
            Some((_, current)) if current.is_nan() => break,
            Some(_) if score.is_nan() => {
                best = Some((idx, score));
                break;
            }
            Some((_, current)) if score > current => best = Some((idx, score)),
            _ => {}
        }
    }
    best.map(|(idx, _)| idx)
}

/// Label at `idx`, or `class_<idx>` when the label list is shorter than the
/// model output.
pub fn label_for(labels: &LabelList, idx: usize) -> String {
    labels
        .get(idx)
        .cloned()
        .unwrap_or_else(|| format!("class_{}", idx))
}
