//! Declarative macros that generate the repetitive parts of the schema
//! layer: typed-attribute accessor quartets, enumeration string tables,
//! list-item registrations, and trait delegation for element-group enums.
//!
//! Every concrete SED-ML type exposes the same accessor surface per
//! attribute (`x()`, `set_x()`, `is_set_x()`, `unset_x()`); writing those by
//! hand for ~150 attributes would be pure noise, so the macros below stamp
//! them out from one line per attribute.

/// Accessors for an optional string-typed attribute slot.
macro_rules! sed_string_attr {
    ($(#[$meta:meta])* $get:ident, $set:ident, $is_set:ident, $unset:ident, $field:ident) => {
        $(#[$meta])*
        pub fn $get(&self) -> Option<&str> {
            self.$field.as_deref()
        }

        pub fn $set(&mut self, value: impl Into<String>) {
            self.$field = Some(value.into());
        }

        pub fn $is_set(&self) -> bool {
            self.$field.is_some()
        }

        pub fn $unset(&mut self) {
            self.$field = None;
        }
    };
}

/// Accessors for an optional `Copy`-typed attribute slot (numbers, bools).
macro_rules! sed_copy_attr {
    ($(#[$meta:meta])* $get:ident, $set:ident, $is_set:ident, $unset:ident, $field:ident, $ty:ty) => {
        $(#[$meta])*
        pub fn $get(&self) -> Option<$ty> {
            self.$field
        }

        pub fn $set(&mut self, value: $ty) {
            self.$field = Some(value);
        }

        pub fn $is_set(&self) -> bool {
            self.$field.is_some()
        }

        pub fn $unset(&mut self) {
            self.$field = None;
        }
    };
}

/// Accessors for an optional enumerated attribute slot. An `Invalid`
/// sentinel stored by the parser counts as present-but-not-properly-set, so
/// `is_set_*` only reports known variants.
macro_rules! sed_enum_attr {
    ($(#[$meta:meta])* $get:ident, $set:ident, $is_set:ident, $unset:ident, $field:ident, $ty:ty) => {
        $(#[$meta])*
        pub fn $get(&self) -> Option<$ty> {
            self.$field
        }

        pub fn $set(&mut self, value: $ty) {
            self.$field = Some(value);
        }

        pub fn $is_set(&self) -> bool {
            matches!(self.$field, Some(v) if v.is_known())
        }

        pub fn $unset(&mut self) {
            self.$field = None;
        }
    };
}

/// Defines a SED-ML enumeration with its XML string table and an explicit
/// `Invalid` sentinel variant. Unrecognized strings map to `Invalid` rather
/// than failing, mirroring how the schema treats bad enumeration tokens.
macro_rules! sed_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
        )]
        pub enum $name {
            $($variant,)+
            /// Sentinel for an attribute token that did not match any known
            /// value. Never written back to XML.
            Invalid,
        }

        impl $name {
            /// Parses an XML attribute token; unknown tokens become
            /// `Invalid` (the match is case-sensitive).
            pub fn from_xml_str(s: &str) -> Self {
                match s {
                    $($text => Self::$variant,)+
                    _ => Self::Invalid,
                }
            }

            /// The XML token for this value, or `None` for `Invalid`.
            pub fn as_xml_str(&self) -> Option<&'static str> {
                match self {
                    $(Self::$variant => Some($text),)+
                    Self::Invalid => None,
                }
            }

            /// False for the `Invalid` sentinel.
            pub fn is_known(&self) -> bool {
                self.as_xml_str().is_some()
            }
        }

        impl $crate::schema::types::SedEnum for $name {
            fn from_xml_str(s: &str) -> Self {
                Self::from_xml_str(s)
            }

            fn as_xml_str(&self) -> Option<&'static str> {
                Self::as_xml_str(self)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_xml_str().unwrap_or("invalid"))
            }
        }
    };
}

/// Registers a concrete element type as the item of a `listOf…` container.
macro_rules! sed_list_item {
    ($ty:ty, $tag:literal, $list:literal) => {
        impl $crate::collections::SedListItem for $ty {
            const LIST_NAME: &'static str = $list;

            fn accepts_tag(tag: &str) -> bool {
                tag == $tag
            }

            fn from_tag(tag: &str) -> Option<Self> {
                (tag == $tag).then(Self::default)
            }
        }
    };
}

/// Defines an element-group enum (e.g. the simulation kinds that may appear
/// under `listOfSimulations`), delegating the whole `SedElement` surface to
/// the active variant and registering the group as a list item keyed by tag
/// name. This is the tag-dispatched `createObject` analog for heterogeneous
/// containers.
macro_rules! sed_element_group {
    (
        $(#[$meta:meta])*
        $name:ident, $list:literal {
            $($variant:ident($ty:ty) => $tag:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, serde::Serialize)]
        pub enum $name {
            $($variant($ty),)+
        }

        impl $crate::core::SedElement for $name {
            fn element_name(&self) -> &'static str {
                match self { $(Self::$variant(x) => x.element_name(),)+ }
            }

            fn type_code(&self) -> $crate::core::SedTypeCode {
                match self { $(Self::$variant(x) => x.type_code(),)+ }
            }

            fn allowed_attributes_code(&self) -> $crate::error::SedErrorCode {
                match self { $(Self::$variant(x) => x.allowed_attributes_code(),)+ }
            }

            fn expected_attributes(&self) -> &'static [&'static str] {
                match self { $(Self::$variant(x) => x.expected_attributes(),)+ }
            }

            fn read_attribute(
                &mut self,
                name: &str,
                value: &str,
                ctx: &mut $crate::xml::AttrContext<'_>,
            ) {
                match self { $(Self::$variant(x) => x.read_attribute(name, value, ctx),)+ }
            }

            fn write_attributes(&self, start: &mut quick_xml::events::BytesStart<'static>) {
                match self { $(Self::$variant(x) => x.write_attributes(start),)+ }
            }

            fn create_child(
                &mut self,
                tag: &str,
            ) -> Option<&mut dyn $crate::core::SedElement> {
                match self { $(Self::$variant(x) => x.create_child(tag),)+ }
            }

            fn wants_raw_child(&self, tag: &str) -> bool {
                match self { $(Self::$variant(x) => x.wants_raw_child(tag),)+ }
            }

            fn store_raw_child(&mut self, tag: &str, raw: &str) {
                match self { $(Self::$variant(x) => x.store_raw_child(tag, raw),)+ }
            }

            fn wants_text_child(&self, tag: &str) -> bool {
                match self { $(Self::$variant(x) => x.wants_text_child(tag),)+ }
            }

            fn read_text_child(
                &mut self,
                tag: &str,
                text: &str,
                ctx: &mut $crate::xml::AttrContext<'_>,
            ) {
                match self { $(Self::$variant(x) => x.read_text_child(tag, text, ctx),)+ }
            }

            fn write_children(
                &self,
                w: &mut $crate::xml::writer::XmlWriter,
            ) -> Result<(), $crate::error::SedIoError> {
                match self { $(Self::$variant(x) => x.write_children(w),)+ }
            }

            fn has_children(&self) -> bool {
                match self { $(Self::$variant(x) => x.has_children(),)+ }
            }

            fn has_required_attributes(&self) -> bool {
                match self { $(Self::$variant(x) => x.has_required_attributes(),)+ }
            }

            fn has_required_elements(&self) -> bool {
                match self { $(Self::$variant(x) => x.has_required_elements(),)+ }
            }

            fn id(&self) -> Option<&str> {
                match self { $(Self::$variant(x) => x.id(),)+ }
            }

            fn first_introduced(&self) -> (u32, u32) {
                match self { $(Self::$variant(x) => x.first_introduced(),)+ }
            }

            fn read_namespace_decl(&mut self, prefix: Option<&str>, uri: &str) {
                match self { $(Self::$variant(x) => x.read_namespace_decl(prefix, uri),)+ }
            }
        }

        impl $crate::collections::SedListItem for $name {
            const LIST_NAME: &'static str = $list;

            fn accepts_tag(tag: &str) -> bool {
                matches!(tag, $($tag)|+)
            }

            fn from_tag(tag: &str) -> Option<Self> {
                match tag {
                    $($tag => Some(Self::$variant(<$ty>::default())),)+
                    _ => None,
                }
            }
        }
    };
}
