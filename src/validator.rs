use crate::models::{FormSnapshot, LineItem, RequiredField, SubmitState, Violation};

/// Which fields a positive-amount row must fill in. Past revisions of the
/// form disagreed on this set, so it is configuration rather than a
/// constant; the default is the strictest set.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationPolicy {
    pub required: Vec<RequiredField>,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            required: vec![RequiredField::Account, RequiredField::Description],
        }
    }
}

impl ValidationPolicy {
    pub fn new(required: Vec<RequiredField>) -> Self {
        Self { required }
    }
}

fn missing_fields(item: &LineItem, policy: &ValidationPolicy) -> Vec<RequiredField> {
    policy
        .required
        .iter()
        .copied()
        .filter(|field| match field {
            RequiredField::Account => item.account.is_empty(),
            RequiredField::Description => item.description.is_empty(),
        })
        .collect()
}

/// One full validation pass over the current line items.
///
/// Every item contributes its parsed amount to the total, with parse
/// failures contributing zero. Required-field checks apply only to rows
/// whose amount is strictly positive; the submit gate itself only needs the
/// total to be non-zero. A lone row of -5 therefore yields an enabled
/// submit: per-row positivity and the total gate are deliberately distinct.
pub fn snapshot(items: &[LineItem], policy: &ValidationPolicy) -> FormSnapshot {
    let mut total = 0.0;
    let mut violations = Vec::new();

    for item in items {
        let amount = item.parsed_amount().unwrap_or(0.0);
        total += amount;

        if amount > 0.0 {
            let missing = missing_fields(item, policy);
            if !missing.is_empty() {
                violations.push(Violation {
                    row: item.row,
                    missing,
                });
            }
        }
    }

    let submit = if total == 0.0 || !violations.is_empty() {
        SubmitState::Disabled
    } else {
        SubmitState::Enabled
    };

    FormSnapshot {
        total,
        violations,
        submit,
    }
}

/// The submit control. Starts disabled before any event has fired and only
/// moves through full recomputes.
#[derive(Debug)]
pub struct SubmitGate {
    policy: ValidationPolicy,
    state: SubmitState,
}

impl SubmitGate {
    pub fn new(policy: ValidationPolicy) -> Self {
        Self {
            policy,
            state: SubmitState::Disabled,
        }
    }

    pub fn state(&self) -> SubmitState {
        self.state
    }

    /// Re-runs validation against the current items and moves the gate.
    pub fn recompute(&mut self, items: &[LineItem]) -> FormSnapshot {
        let snap = snapshot(items, &self.policy);
        self.state = snap.submit;
        snap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(row: u32, amount: &str, account: &str, description: &str) -> LineItem {
        LineItem::new(row, amount, account, description)
    }

    #[test]
    fn test_total_ignores_unparseable_amounts() {
        let items = vec![
            item(0, "10", "A", "x"),
            item(1, "abc", "B", "y"),
            item(2, "5.5", "C", "z"),
        ];
        let snap = snapshot(&items, &ValidationPolicy::default());
        assert_eq!(snap.total_text(), "15.50");
    }

    #[test]
    fn test_zero_total_disables_submit() {
        let items = vec![item(0, "", "", ""), item(1, "abc", "", "")];
        let snap = snapshot(&items, &ValidationPolicy::default());
        assert_eq!(snap.total_text(), "0.00");
        assert_eq!(snap.submit, SubmitState::Disabled);
    }

    #[test]
    fn test_complete_row_enables_submit() {
        let items = vec![item(0, "20.00", "Food", "lunch")];
        let snap = snapshot(&items, &ValidationPolicy::default());
        assert_eq!(snap.total_text(), "20.00");
        assert_eq!(snap.submit, SubmitState::Enabled);
        assert!(snap.violations.is_empty());
    }

    #[test]
    fn test_missing_account_disables_submit() {
        let items = vec![item(0, "20.00", "", "lunch")];
        let snap = snapshot(&items, &ValidationPolicy::default());
        assert_eq!(snap.total_text(), "20.00");
        assert_eq!(snap.submit, SubmitState::Disabled);
        assert_eq!(snap.violations.len(), 1);
        assert_eq!(snap.violations[0].missing, vec![RequiredField::Account]);
    }

    #[test]
    fn test_missing_description_disables_submit() {
        let items = vec![item(0, "20.00", "Food", "")];
        let snap = snapshot(&items, &ValidationPolicy::default());
        assert_eq!(snap.submit, SubmitState::Disabled);
        assert_eq!(
            snap.violations[0].missing,
            vec![RequiredField::Description]
        );
    }

    #[test]
    fn test_violation_in_one_row_blocks_the_whole_form() {
        let items = vec![
            item(0, "20.00", "Food", "lunch"),
            item(1, "3.00", "", ""),
        ];
        let snap = snapshot(&items, &ValidationPolicy::default());
        assert_eq!(snap.total_text(), "23.00");
        assert_eq!(snap.submit, SubmitState::Disabled);
    }

    #[test]
    fn test_zero_amount_row_exempt_from_required_fields() {
        let items = vec![item(0, "0", "", "")];
        let snap = snapshot(&items, &ValidationPolicy::default());
        assert_eq!(snap.total_text(), "0.00");
        assert!(snap.violations.is_empty());
        // Still disabled: the total is zero.
        assert_eq!(snap.submit, SubmitState::Disabled);
    }

    #[test]
    fn test_negative_amount_row_exempt_and_total_gate_allows_negative() {
        // Required-field checks only apply to rows with amount > 0, and the
        // total gate only needs total != 0. A lone -5 row is submittable.
        let items = vec![item(0, "-5", "", "")];
        let snap = snapshot(&items, &ValidationPolicy::default());
        assert_eq!(snap.total_text(), "-5.00");
        assert!(snap.violations.is_empty());
        assert_eq!(snap.submit, SubmitState::Enabled);
    }

    #[test]
    fn test_negative_row_never_blocks_a_valid_form() {
        let items = vec![
            item(0, "20.00", "Food", "lunch"),
            item(1, "-3.00", "", ""),
        ];
        let snap = snapshot(&items, &ValidationPolicy::default());
        assert_eq!(snap.total_text(), "17.00");
        assert_eq!(snap.submit, SubmitState::Enabled);
    }

    #[test]
    fn test_offsetting_rows_sum_to_zero_and_disable() {
        let items = vec![
            item(0, "5", "Food", "lunch"),
            item(1, "-5", "", ""),
        ];
        let snap = snapshot(&items, &ValidationPolicy::default());
        assert_eq!(snap.total_text(), "0.00");
        assert_eq!(snap.submit, SubmitState::Disabled);
    }

    #[test]
    fn test_account_only_policy() {
        let policy = ValidationPolicy::new(vec![RequiredField::Account]);
        let items = vec![item(0, "20.00", "Food", "")];
        let snap = snapshot(&items, &policy);
        assert_eq!(snap.submit, SubmitState::Enabled);
    }

    #[test]
    fn test_empty_policy_only_gates_on_total() {
        let policy = ValidationPolicy::new(vec![]);
        let items = vec![item(0, "20.00", "", "")];
        let snap = snapshot(&items, &policy);
        assert_eq!(snap.submit, SubmitState::Enabled);
    }

    #[test]
    fn test_gate_starts_disabled() {
        let gate = SubmitGate::new(ValidationPolicy::default());
        assert_eq!(gate.state(), SubmitState::Disabled);
    }

    #[test]
    fn test_gate_follows_recompute() {
        let mut gate = SubmitGate::new(ValidationPolicy::default());
        let items = vec![item(0, "20.00", "Food", "lunch")];
        gate.recompute(&items);
        assert_eq!(gate.state(), SubmitState::Enabled);

        let items = vec![item(0, "20.00", "", "lunch")];
        gate.recompute(&items);
        assert_eq!(gate.state(), SubmitState::Disabled);
    }

    #[test]
    fn test_no_items_disables() {
        let snap = snapshot(&[], &ValidationPolicy::default());
        assert_eq!(snap.total_text(), "0.00");
        assert_eq!(snap.submit, SubmitState::Disabled);
    }
}
