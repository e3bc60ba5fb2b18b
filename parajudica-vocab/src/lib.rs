//! Vocabulary Constants and Namespace Codes for Parajudica
//!
//! This crate provides a centralized location for the vocabulary IRIs,
//! namespace codes, and label/facet local names used throughout the
//! Parajudica ecosystem.
//!
//! # Organization
//!
//! Constants are organized by vocabulary:
//! - `namespaces` - Namespace codes used for IRI encoding
//! - `prefixes` - The IRI prefix behind each namespace code
//! - `predicates` - Local names of the pj metamodel predicates
//! - `kinds` - Local names of the pj container/entity kinds
//! - `facets` - Local names of the sdc facet vocabulary
//! - `labels` - Local names of the per-framework label vocabularies

/// Namespace codes used for compact IRI encoding.
///
/// Codes are stable: they appear in cached stores, so renumbering an
/// existing code is a breaking change.
pub mod namespaces {
    /// Code 0: empty / relative IRI prefix
    pub const EMPTY: u16 = 0;

    /// Code 1: RDF
    pub const RDF: u16 = 1;

    /// Code 2: XSD datatypes
    pub const XSD: u16 = 2;

    /// Code 3: Parajudica metamodel (pj)
    pub const PJ: u16 = 3;

    /// Code 4: Structured-data-classification facet vocabulary (sdc)
    pub const SDC: u16 = 4;

    /// Code 5: HIPAA framework label namespace
    pub const HIPAA: u16 = 5;

    /// Code 6: GDPR framework label namespace
    pub const GDPR: u16 = 6;

    /// Code 7: EMA framework label namespace
    pub const EMA: u16 = 7;

    /// Code 8: Italy framework label namespace
    pub const ITALY: u16 = 8;

    /// Code 9: example application data namespace
    pub const APP: u16 = 9;

    /// Code 10: skolemized derived-node namespace
    pub const SKOLEM: u16 = 10;
}

/// IRI prefix strings behind each namespace code.
pub mod prefixes {
    /// rdf: prefix IRI
    pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

    /// xsd: prefix IRI
    pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";

    /// pj: prefix IRI (engine metamodel)
    pub const PJ: &str = "https://openprovenance.org/ns/parajudica#";

    /// sdc: prefix IRI (facet vocabulary)
    pub const SDC: &str = "https://openprovenance.org/ns/facet/sdc#";

    /// hipaa: prefix IRI
    pub const HIPAA: &str = "https://openprovenance.org/ns/framework/hipaa#";

    /// gdpr: prefix IRI
    pub const GDPR: &str = "https://openprovenance.org/ns/framework/gdpr#";

    /// ema: prefix IRI
    pub const EMA: &str = "https://openprovenance.org/ns/framework/ema#";

    /// italy: prefix IRI
    pub const ITALY: &str = "https://openprovenance.org/ns/framework/italy#";

    /// app: prefix IRI (example medical data)
    pub const APP: &str = "https://example.org/medical#";

    /// Skolem URN prefix for content-derived node identifiers
    pub const SKOLEM: &str = "urn:skolem:";
}

/// pj metamodel predicate local names.
pub mod predicates {
    /// rdf:type local name (in the RDF namespace)
    pub const RDF_TYPE: &str = "type";

    /// pj:contains - parent container to child container
    pub const CONTAINS: &str = "contains";

    /// pj:includes - scope to member container
    pub const INCLUDES: &str = "includes";

    /// pj:hasFacet - container to intrinsic facet
    pub const HAS_FACET: &str = "hasFacet";

    /// pj:hasLabel - container to derived framework label (scope-qualified)
    pub const HAS_LABEL: &str = "hasLabel";

    /// pj:joinableWith - symmetric table joinability edge
    pub const JOINABLE_WITH: &str = "joinableWith";

    /// pj:kAnonymity - declared anonymity-set size for a table
    pub const K_ANONYMITY: &str = "kAnonymity";

    /// pj:kAnonymityAnalysis - computed anonymity-set size (scope-qualified)
    pub const K_ANONYMITY_ANALYSIS: &str = "kAnonymityAnalysis";

    /// pj:sampleRow - table to a sampled data row node
    pub const SAMPLE_ROW: &str = "sampleRow";

    /// pj:container - result node back-reference to the analyzed container
    pub const CONTAINER: &str = "container";

    /// pj:k - result node anonymity-set size
    pub const K: &str = "k";
}

/// pj entity kind local names (objects of rdf:type).
pub mod kinds {
    /// pj:Database
    pub const DATABASE: &str = "Database";

    /// pj:Table
    pub const TABLE: &str = "Table";

    /// pj:Field
    pub const FIELD: &str = "Field";

    /// pj:Scope
    pub const SCOPE: &str = "Scope";

    /// pj:KAnonymityResult
    pub const K_ANONYMITY_RESULT: &str = "KAnonymityResult";
}

/// sdc facet local names (closed vocabulary, loader-asserted).
pub mod facets {
    /// sdc:Individual - data is about natural persons
    pub const INDIVIDUAL: &str = "Individual";

    /// sdc:Healthcare - data arises in a healthcare context
    pub const HEALTHCARE: &str = "Healthcare";

    /// sdc:DirectIdentifier - field/table directly identifies a person
    pub const DIRECT_IDENTIFIER: &str = "DirectIdentifier";

    /// sdc:IndirectIdentifier - quasi-identifier usable for re-identification
    pub const INDIRECT_IDENTIFIER: &str = "IndirectIdentifier";

    /// sdc:InternalIdentifier - internal surrogate key, not externally linkable
    pub const INTERNAL_IDENTIFIER: &str = "InternalIdentifier";

    /// sdc:UniqueIdentifier - value is unique across rows (singling-out risk)
    pub const UNIQUE_IDENTIFIER: &str = "UniqueIdentifier";

    /// sdc:MomentData - dates/timestamps tied to an individual
    pub const MOMENT_DATA: &str = "MomentData";

    /// sdc:OpenGroup - population is not a closed cohort
    pub const OPEN_GROUP: &str = "OpenGroup";

    /// The 18 HIPAA Safe Harbor identifier facets.
    ///
    /// Any container carrying one of these is a Safe Harbor identifier
    /// under 45 CFR 164.514(b)(2).
    pub const SAFE_HARBOR: [&str; 18] = [
        "Name",
        "GeographicSubdivision",
        "MomentData",
        "TelephoneNumber",
        "FaxNumber",
        "EmailAddress",
        "SocialSecurityNumber",
        "MedicalRecordNumber",
        "HealthPlanNumber",
        "AccountNumber",
        "CertificateNumber",
        "VehicleIdentifier",
        "DeviceIdentifier",
        "WebUrl",
        "IpAddress",
        "BiometricIdentifier",
        "FullFacePhoto",
        "OtherUniqueIdentifier",
    ];
}

/// Per-framework label local names.
pub mod labels {
    /// hipaa:SafeHarborIdentifier
    pub const SAFE_HARBOR_IDENTIFIER: &str = "SafeHarborIdentifier";

    /// hipaa:HIPAAIdentifier
    pub const HIPAA_IDENTIFIER: &str = "HIPAAIdentifier";

    /// hipaa:PHI
    pub const PHI: &str = "PHI";

    /// gdpr:PersonalData
    pub const PERSONAL_DATA: &str = "PersonalData";

    /// gdpr:SpecialCategoryData
    pub const SPECIAL_CATEGORY_DATA: &str = "SpecialCategoryData";

    /// {hipaa,ema,italy}:HighReidentificationRisk
    pub const HIGH_REIDENTIFICATION_RISK: &str = "HighReidentificationRisk";

    /// {hipaa,ema,italy}:AcceptableDeidentification
    pub const ACCEPTABLE_DEIDENTIFICATION: &str = "AcceptableDeidentification";
}

/// All registered (code, prefix label, prefix IRI) triples, in code order.
///
/// The loader and query parser use this table to resolve prefixed names;
/// the serializer uses it to render compact IRIs.
pub fn registered_namespaces() -> &'static [(u16, &'static str, &'static str)] {
    &[
        (namespaces::RDF, "rdf", prefixes::RDF),
        (namespaces::XSD, "xsd", prefixes::XSD),
        (namespaces::PJ, "pj", prefixes::PJ),
        (namespaces::SDC, "sdc", prefixes::SDC),
        (namespaces::HIPAA, "hipaa", prefixes::HIPAA),
        (namespaces::GDPR, "gdpr", prefixes::GDPR),
        (namespaces::EMA, "ema", prefixes::EMA),
        (namespaces::ITALY, "italy", prefixes::ITALY),
        (namespaces::APP, "app", prefixes::APP),
        (namespaces::SKOLEM, "skolem", prefixes::SKOLEM),
    ]
}

/// Look up the IRI prefix for a namespace code.
pub fn prefix_iri(code: u16) -> Option<&'static str> {
    registered_namespaces()
        .iter()
        .find(|(c, _, _)| *c == code)
        .map(|(_, _, iri)| *iri)
}

/// Look up the namespace code whose IRI prefix starts the given IRI.
///
/// Returns the matching code and the local-name remainder. Longest prefix
/// wins, so overlapping prefixes resolve to the most specific namespace.
pub fn split_iri(iri: &str) -> Option<(u16, &str)> {
    registered_namespaces()
        .iter()
        .filter(|(_, _, prefix)| iri.starts_with(prefix))
        .max_by_key(|(_, _, prefix)| prefix.len())
        .map(|(code, _, prefix)| (*code, &iri[prefix.len()..]))
}
