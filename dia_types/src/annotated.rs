use crate::Attribute;

/// A nullable payload together with its ordered attribute list.
///
/// Every value kind except Attribute and Reference has this shape.
/// `payload == None` is the kind's null instance. Attributes survive nullness.
#[derive(PartialEq, Eq, Hash, Clone, Debug)]
pub struct Annotated<T> {
    attributes: Vec<Attribute>,
    payload: Option<T>,
}

impl<T> Annotated<T> {
    pub fn null() -> Self {
        Self {
            attributes: vec![],
            payload: None,
        }
    }

    pub fn of(payload: T) -> Self {
        Self {
            attributes: vec![],
            payload: Some(payload),
        }
    }

    pub fn from_parts(attributes: Vec<Attribute>, payload: Option<T>) -> Self {
        Self {
            attributes,
            payload,
        }
    }

    pub fn with_attributes<I: IntoIterator<Item = Attribute>>(mut self, attributes: I) -> Self {
        self.attributes.extend(attributes);
        self
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }
    pub fn attributes_mut(&mut self) -> &mut Vec<Attribute> {
        &mut self.attributes
    }

    pub fn payload(&self) -> Option<&T> {
        self.payload.as_ref()
    }
    pub fn payload_mut(&mut self) -> Option<&mut T> {
        self.payload.as_mut()
    }

    pub fn is_null(&self) -> bool {
        self.payload.is_none()
    }
    pub fn is_annotated(&self) -> bool {
        !self.attributes.is_empty()
    }

    pub fn into_parts(self) -> (Vec<Attribute>, Option<T>) {
        (self.attributes, self.payload)
    }
}

impl<T: Default> Default for Annotated<T> {
    /// The kind's canonical default: non-null, unannotated, default payload.
    fn default() -> Self {
        Self::of(T::default())
    }
}
