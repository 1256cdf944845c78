use std::fmt;

use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

// ---------------------------------------------------------------------------
// Status – lifecycle tag of a claim
// ---------------------------------------------------------------------------

/// Lifecycle tag of a precatório.
///
/// Purely descriptive: there are no transition rules between states.
/// Variant order is the order used by reports and legends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Status {
    Registered,
    UnderReview,
    AwaitingSignature,
    Published,
    Granted,
    Denied,
    AwaitingPayment,
    InSettlement,
    PartiallyPaid,
    FullyPaid,
    Suspended,
    Cancelled,
    Archived,
}

impl Status {
    pub const ALL: [Status; 13] = [
        Status::Registered,
        Status::UnderReview,
        Status::AwaitingSignature,
        Status::Published,
        Status::Granted,
        Status::Denied,
        Status::AwaitingPayment,
        Status::InSettlement,
        Status::PartiallyPaid,
        Status::FullyPaid,
        Status::Suspended,
        Status::Cancelled,
        Status::Archived,
    ];

    /// Display label, as written in the court registry.
    pub fn label(&self) -> &'static str {
        match self {
            Status::Registered => "Cadastrado",
            Status::UnderReview => "Em Análise",
            Status::AwaitingSignature => "Aguardando assinatura / homologação",
            Status::Published => "Publicado",
            Status::Granted => "Deferido",
            Status::Denied => "Indeferido",
            Status::AwaitingPayment => "Aguardando pagamento",
            Status::InSettlement => "Em acordo / conciliação",
            Status::PartiallyPaid => "Pago parcialmente",
            Status::FullyPaid => "Pago integralmente / Quitado",
            Status::Suspended => "Suspenso",
            Status::Cancelled => "Cancelado",
            Status::Archived => "Arquivado",
        }
    }

    /// Position in [`Status::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Claimant – the legal representative a claim belongs to
// ---------------------------------------------------------------------------

/// Number of distinct claimants in a generated dataset.
pub const CLAIMANT_COUNT: u8 = 10;

/// One of the closed set of claimants (`Advogado 1` … `Advogado 10`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Claimant(u8);

impl Claimant {
    /// Returns `None` outside `1..=CLAIMANT_COUNT`.
    pub fn new(number: u8) -> Option<Self> {
        (1..=CLAIMANT_COUNT).contains(&number).then_some(Claimant(number))
    }

    /// Claimant assigned to the `row`-th generated record.
    pub fn for_row(row: usize) -> Self {
        Claimant((row % CLAIMANT_COUNT as usize) as u8 + 1)
    }

    pub fn number(&self) -> u8 {
        self.0
    }

    pub fn all() -> impl Iterator<Item = Claimant> {
        (1..=CLAIMANT_COUNT).map(Claimant)
    }
}

impl fmt::Display for Claimant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Advogado {}", self.0)
    }
}

impl Serialize for Claimant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ---------------------------------------------------------------------------
// ClaimRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// Column headers of the exported sheet, in export order.
pub const EXPORT_COLUMNS: [&str; 6] = [
    "Número",
    "Credor",
    "Valor",
    "Situação",
    "Documentos Anexados (%)",
    "Honorário",
];

/// A single precatório.
///
/// `fee` is always `amount * fee_rate` for the rate of the store that
/// produced the record; the store rebuilds every record when the rate
/// changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClaimRecord {
    #[serde(rename = "Número")]
    pub id: String,
    #[serde(rename = "Credor")]
    pub claimant: Claimant,
    #[serde(rename = "Valor")]
    pub amount: Decimal,
    #[serde(rename = "Situação")]
    pub status: Status,
    #[serde(rename = "Documentos Anexados (%)")]
    pub documents_attached_pct: u8,
    #[serde(rename = "Honorário")]
    pub fee: Decimal,
}

impl ClaimRecord {
    /// Build a record, deriving the fee from `fee_rate`.
    pub fn new(
        id: impl Into<String>,
        claimant: Claimant,
        amount: Decimal,
        status: Status,
        documents_attached_pct: u8,
        fee_rate: Decimal,
    ) -> Self {
        ClaimRecord {
            id: id.into(),
            claimant,
            amount,
            status,
            documents_attached_pct: documents_attached_pct.min(100),
            fee: amount * fee_rate,
        }
    }

    /// All attached documents are present.
    pub fn is_complete(&self) -> bool {
        self.documents_attached_pct >= 100
    }
}
