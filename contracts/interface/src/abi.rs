//! Minimal Solidity ABI support for the Base Station contracts.
//!
//! Only the parameter kinds the deployed contracts take are modelled:
//! `string` and `uint256`. Calldata follows the standard head/tail layout:
//! `[selector(4)][head words][tail]`, where dynamic values store an offset
//! in the head and `[length word][bytes padded to 32]` in the tail.

use alloy_primitives::{keccak256, U256};
use serde::Serialize;
use thiserror::Error;

/// Size of one ABI word.
pub const WORD: usize = 32;

/// Size of a function selector.
pub const SELECTOR_LEN: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AbiError {
    #[error("{function} expects {expected} arguments, got {got}")]
    ArgumentCount {
        function: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("argument `{param}` of {function} must be {expected}, got {got}")]
    TypeMismatch {
        function: &'static str,
        param: &'static str,
        expected: ParamKind,
        got: ParamKind,
    },

    #[error("return data too short: expected at least 32 bytes, got {0}")]
    ShortReturnData(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    String,
    Uint256,
}

impl ParamKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ParamKind::String => "string",
            ParamKind::Uint256 => "uint256",
        }
    }

    pub const fn is_dynamic(&self) -> bool {
        matches!(self, ParamKind::String)
    }
}

impl std::fmt::Display for ParamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StateMutability {
    Pure,
    View,
    NonPayable,
    Payable,
}

/// A named, typed function input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Param {
    pub name: &'static str,
    pub kind: ParamKind,
}

impl Param {
    pub const fn string(name: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::String,
        }
    }

    pub const fn uint256(name: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::Uint256,
        }
    }
}

/// ABI fragment of a single contract function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FunctionFragment {
    pub name: &'static str,
    pub inputs: &'static [Param],
    pub mutability: StateMutability,
}

impl FunctionFragment {
    pub const fn new(
        name: &'static str,
        inputs: &'static [Param],
        mutability: StateMutability,
    ) -> Self {
        Self {
            name,
            inputs,
            mutability,
        }
    }

    /// Canonical signature, e.g. `deployToken(string,string,uint256)`.
    pub fn signature(&self) -> String {
        let kinds: Vec<&str> = self.inputs.iter().map(|p| p.kind.as_str()).collect();
        format!("{}({})", self.name, kinds.join(","))
    }

    /// First four bytes of the keccak-256 hash of the signature.
    pub fn selector(&self) -> [u8; SELECTOR_LEN] {
        let hash = keccak256(self.signature().as_bytes());
        let mut selector = [0u8; SELECTOR_LEN];
        selector.copy_from_slice(&hash[..SELECTOR_LEN]);
        selector
    }

    pub fn is_payable(&self) -> bool {
        self.mutability == StateMutability::Payable
    }

    /// Encode a call to this function with the given arguments.
    pub fn encode_call(&self, args: &[AbiValue]) -> Result<Vec<u8>, AbiError> {
        if args.len() != self.inputs.len() {
            return Err(AbiError::ArgumentCount {
                function: self.name,
                expected: self.inputs.len(),
                got: args.len(),
            });
        }
        for (param, arg) in self.inputs.iter().zip(args) {
            if param.kind != arg.kind() {
                return Err(AbiError::TypeMismatch {
                    function: self.name,
                    param: param.name,
                    expected: param.kind,
                    got: arg.kind(),
                });
            }
        }

        let mut out = Vec::with_capacity(SELECTOR_LEN + WORD * args.len());
        out.extend_from_slice(&self.selector());
        out.extend_from_slice(&encode_args(args));
        Ok(out)
    }
}

/// A concrete argument value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum AbiValue {
    String(String),
    Uint(U256),
}

impl AbiValue {
    pub fn kind(&self) -> ParamKind {
        match self {
            AbiValue::String(_) => ParamKind::String,
            AbiValue::Uint(_) => ParamKind::Uint256,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AbiValue::String(s) => Some(s),
            AbiValue::Uint(_) => None,
        }
    }

    pub fn as_uint(&self) -> Option<U256> {
        match self {
            AbiValue::Uint(v) => Some(*v),
            AbiValue::String(_) => None,
        }
    }
}

impl From<&str> for AbiValue {
    fn from(value: &str) -> Self {
        AbiValue::String(value.to_string())
    }
}

impl From<String> for AbiValue {
    fn from(value: String) -> Self {
        AbiValue::String(value)
    }
}

impl From<U256> for AbiValue {
    fn from(value: U256) -> Self {
        AbiValue::Uint(value)
    }
}

/// Encode an argument tuple (without selector).
pub fn encode_args(args: &[AbiValue]) -> Vec<u8> {
    let head_len = WORD * args.len();
    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();

    for arg in args {
        match arg {
            AbiValue::Uint(value) => head.extend_from_slice(&value.to_be_bytes::<WORD>()),
            AbiValue::String(value) => {
                let offset = U256::from(head_len + tail.len());
                head.extend_from_slice(&offset.to_be_bytes::<WORD>());

                let bytes = value.as_bytes();
                tail.extend_from_slice(&U256::from(bytes.len()).to_be_bytes::<WORD>());
                tail.extend_from_slice(bytes);
                tail.resize(tail.len() + padding(bytes.len()), 0);
            },
        }
    }

    head.extend_from_slice(&tail);
    head
}

/// Decode the first return word as a `uint256`.
pub fn decode_uint(data: &[u8]) -> Result<U256, AbiError> {
    if data.len() < WORD {
        return Err(AbiError::ShortReturnData(data.len()));
    }
    Ok(U256::from_be_slice(&data[..WORD]))
}

fn padding(len: usize) -> usize {
    (WORD - len % WORD) % WORD
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAY_SOMETHING: FunctionFragment = FunctionFragment::new(
        "saySomething",
        &[Param::string("action"), Param::string("message")],
        StateMutability::Payable,
    );

    const DEPLOY_TOKEN: FunctionFragment = FunctionFragment::new(
        "deployToken",
        &[
            Param::string("name"),
            Param::string("symbol"),
            Param::uint256("supply"),
        ],
        StateMutability::Payable,
    );

    #[test]
    fn test_signature() {
        assert_eq!(SAY_SOMETHING.signature(), "saySomething(string,string)");
        assert_eq!(DEPLOY_TOKEN.signature(), "deployToken(string,string,uint256)");
    }

    #[test]
    fn test_selector_matches_keccak() {
        let hash = keccak256(b"saySomething(string,string)");
        assert_eq!(SAY_SOMETHING.selector(), hash[..4]);

        let mint = FunctionFragment::new("mint", &[], StateMutability::Payable);
        assert_eq!(mint.selector(), [0x12, 0x49, 0xc5, 0x8b]);
    }

    #[test]
    fn test_encode_strings() {
        let data = SAY_SOMETHING
            .encode_call(&["GM".into(), "Based GM!".into()])
            .unwrap();

        // selector + 2 head words + (len word + 1 data word) * 2
        assert_eq!(data.len(), 4 + 32 * 2 + 64 * 2);

        let body = &data[4..];
        assert_eq!(U256::from_be_slice(&body[0..32]), U256::from(0x40));
        assert_eq!(U256::from_be_slice(&body[32..64]), U256::from(0x80));
        assert_eq!(U256::from_be_slice(&body[64..96]), U256::from(2));
        assert_eq!(&body[96..98], b"GM");
        assert!(body[98..128].iter().all(|b| *b == 0));
        assert_eq!(U256::from_be_slice(&body[128..160]), U256::from(9));
        assert_eq!(&body[160..169], b"Based GM!");
    }

    #[test]
    fn test_encode_mixed() {
        let supply = U256::from(1_000_000u64);
        let data = DEPLOY_TOKEN
            .encode_call(&["BaseCat".into(), "BCAT".into(), supply.into()])
            .unwrap();

        let body = &data[4..];
        assert_eq!(U256::from_be_slice(&body[0..32]), U256::from(0x60));
        assert_eq!(U256::from_be_slice(&body[32..64]), U256::from(0xa0));
        assert_eq!(U256::from_be_slice(&body[64..96]), supply);
    }

    #[test]
    fn test_encode_rejects_bad_arguments() {
        let err = DEPLOY_TOKEN.encode_call(&["a".into()]).unwrap_err();
        assert!(matches!(err, AbiError::ArgumentCount { expected: 3, got: 1, .. }));

        let err = DEPLOY_TOKEN
            .encode_call(&["a".into(), "b".into(), "c".into()])
            .unwrap_err();
        assert!(matches!(err, AbiError::TypeMismatch { param: "supply", .. }));
    }

    #[test]
    fn test_decode_uint() {
        let word = U256::from(42).to_be_bytes::<32>();
        assert_eq!(decode_uint(&word).unwrap(), U256::from(42));
        assert_eq!(decode_uint(&word[..8]), Err(AbiError::ShortReturnData(8)));
    }
}
