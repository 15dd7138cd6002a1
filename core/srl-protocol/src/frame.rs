use rkyv::{Archive, Deserialize, Serialize};
use crate::span::TextSpan;
use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// The frame-evoking expression and the frame it evokes.
#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct FrameTarget {
    pub name: String,
    pub spans: Vec<TextSpan>,
}

/// A role label and the spans filling it.
#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct FrameElement {
    pub name: String,
    pub spans: Vec<TextSpan>,
}

#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct AnnotationSet {
    pub rank: u32,
    pub score: f64,
    #[cfg_attr(feature = "serde", serde(rename = "frameElements", default))]
    pub frame_elements: Vec<FrameElement>,
}

#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct SrlFrame {
    pub target: FrameTarget,
    #[cfg_attr(feature = "serde", serde(rename = "annotationSets", default))]
    pub annotation_sets: Vec<AnnotationSet>,
}

/// One line of an SRL JSON-lines file.
#[derive(Debug, Clone, PartialEq, Default, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct SrlRecord {
    #[cfg_attr(feature = "serde", serde(default))]
    pub frames: Vec<SrlFrame>,
}
