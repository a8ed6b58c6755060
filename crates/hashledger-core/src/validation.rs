//! Input validation for new transfers.

use crate::error::{Field, ValidationError};
use crate::record::Amount;

/// A validated, trimmed transfer request, ready to be sealed into a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    sender: String,
    receiver: String,
    amount_text: String,
    amount: Amount,
}

impl Transfer {
    /// Validate raw transfer input.
    ///
    /// All three fields are trimmed. Empty fields are reported first, in
    /// field order, then the amount is parsed.
    pub fn parse(sender: &str, receiver: &str, amount: &str) -> Result<Self, ValidationError> {
        let sender = sender.trim();
        let receiver = receiver.trim();
        let amount_text = amount.trim();

        for (field, value) in [
            (Field::Sender, sender),
            (Field::Receiver, receiver),
            (Field::Amount, amount_text),
        ] {
            if value.is_empty() {
                return Err(ValidationError::EmptyField(field));
            }
        }

        let amount = Amount::parse(amount_text)?;

        Ok(Self {
            sender: sender.to_string(),
            receiver: receiver.to_string(),
            amount_text: amount_text.to_string(),
            amount,
        })
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn receiver(&self) -> &str {
        &self.receiver
    }

    /// The trimmed amount exactly as entered. This is what the digest covers.
    pub fn amount_text(&self) -> &str {
        &self.amount_text
    }

    /// The normalized amount. This is what the record stores.
    pub fn amount(&self) -> &Amount {
        &self.amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_transfer_is_trimmed() {
        let transfer = Transfer::parse("  Alice ", "\tBob", " 10.5\n").unwrap();
        assert_eq!(transfer.sender(), "Alice");
        assert_eq!(transfer.receiver(), "Bob");
        assert_eq!(transfer.amount_text(), "10.5");
        assert_eq!(transfer.amount().as_str(), "10.50");
    }

    #[test]
    fn test_empty_sender() {
        assert_eq!(
            Transfer::parse("", "Bob", "5"),
            Err(ValidationError::EmptyField(Field::Sender))
        );
    }

    #[test]
    fn test_whitespace_only_receiver() {
        assert_eq!(
            Transfer::parse("Alice", "   ", "5"),
            Err(ValidationError::EmptyField(Field::Receiver))
        );
    }

    #[test]
    fn test_empty_amount() {
        assert_eq!(
            Transfer::parse("Alice", "Bob", " "),
            Err(ValidationError::EmptyField(Field::Amount))
        );
    }

    #[test]
    fn test_unparsable_amount() {
        assert_eq!(
            Transfer::parse("Alice", "Bob", "not-a-number"),
            Err(ValidationError::InvalidAmount("not-a-number".into()))
        );
    }

    #[test]
    fn test_negative_amount_accepted() {
        let transfer = Transfer::parse("Alice", "Bob", "-3").unwrap();
        assert_eq!(transfer.amount().as_str(), "-3.00");
    }
}
