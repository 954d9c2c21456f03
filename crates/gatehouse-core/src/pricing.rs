//! Pricing policy applied at issuance.

/// Fraction taken off the base price for employee buyers.
pub const EMPLOYEE_DISCOUNT: f64 = 0.50;

/// Compute the final price stored on a ticket.
///
/// Employees pay `base_price * (1.0 - EMPLOYEE_DISCOUNT)`; everyone else
/// pays the base price unchanged. No rounding is applied.
pub fn final_price(employee: bool, base_price: f64) -> f64 {
  if employee {
    base_price * (1.0 - EMPLOYEE_DISCOUNT)
  } else {
    base_price
  }
}

#[cfg(test)]
mod tests {
  use super::final_price;

  #[test]
  fn employee_pays_exactly_half() {
    assert_eq!(final_price(true, 100.0), 50.0);
    assert_eq!(final_price(true, 150.0), 75.0);
    assert_eq!(final_price(true, 0.0), 0.0);
    assert_eq!(final_price(true, 33.30), 16.65);
  }

  #[test]
  fn non_employee_pays_base_price_unchanged() {
    assert_eq!(final_price(false, 100.0), 100.0);
    assert_eq!(final_price(false, 17.99), 17.99);
    assert_eq!(final_price(false, 0.0), 0.0);
  }
}
