//! Validated catalogue of descriptors
//!
//! The registry is built once from static declarations and checked up front:
//! every reference resolves, enum names and values are unique, endpoint
//! placeholders match their required arguments, and no record contains
//! itself through any chain of nested records.

use super::endpoint::{Arg, EndpointDescriptor};
use super::types::{EnumDescriptor, SchemaDescriptor, TypeTag};
use crate::error::{Error, Result};
use crate::template;
use std::collections::{HashMap, HashSet};

/// Lookup tables over the static catalogue
#[derive(Debug, Clone)]
pub struct Registry {
    schemas: HashMap<&'static str, &'static SchemaDescriptor>,
    enums: HashMap<&'static str, &'static EnumDescriptor>,
    endpoints: Vec<&'static EndpointDescriptor>,
}

impl Registry {
    /// Build and validate a registry
    pub fn new(
        schemas: &'static [SchemaDescriptor],
        enums: &'static [EnumDescriptor],
        endpoints: &'static [EndpointDescriptor],
    ) -> Result<Self> {
        let mut schema_map = HashMap::new();
        for schema in schemas {
            if schema_map.insert(schema.id, schema).is_some() {
                return Err(Error::invalid_catalog(format!(
                    "duplicate schema '{}'",
                    schema.id
                )));
            }
        }

        let mut enum_map = HashMap::new();
        for descriptor in enums {
            if enum_map.insert(descriptor.id, descriptor).is_some() {
                return Err(Error::invalid_catalog(format!(
                    "duplicate enum '{}'",
                    descriptor.id
                )));
            }
        }

        let registry = Self {
            schemas: schema_map,
            enums: enum_map,
            endpoints: endpoints.iter().collect(),
        };

        for descriptor in enums {
            registry.check_enum(descriptor)?;
        }
        for schema in schemas {
            registry.check_schema(schema)?;
        }
        registry.check_acyclic()?;
        let mut endpoint_ids = HashSet::new();
        for endpoint in endpoints {
            if !endpoint_ids.insert(endpoint.id) {
                return Err(Error::invalid_catalog(format!(
                    "duplicate endpoint '{}'",
                    endpoint.id
                )));
            }
            registry.check_endpoint(endpoint)?;
        }

        Ok(registry)
    }

    /// Look up a record schema
    pub fn schema(&self, id: &str) -> Option<&'static SchemaDescriptor> {
        self.schemas.get(id).copied()
    }

    /// Look up an enum
    pub fn enumeration(&self, id: &str) -> Option<&'static EnumDescriptor> {
        self.enums.get(id).copied()
    }

    /// Look up an endpoint by id
    pub fn endpoint(&self, id: &str) -> Result<&'static EndpointDescriptor> {
        self.endpoints
            .iter()
            .copied()
            .find(|e| e.id == id)
            .ok_or_else(|| Error::UnknownEndpoint {
                endpoint: id.to_string(),
            })
    }

    /// All endpoints, in declaration order
    pub fn endpoints(&self) -> impl Iterator<Item = &'static EndpointDescriptor> + '_ {
        self.endpoints.iter().copied()
    }

    /// Number of record schemas
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }

    fn check_enum(&self, descriptor: &EnumDescriptor) -> Result<()> {
        let mut names = HashSet::new();
        let mut values = HashSet::new();
        for variant in descriptor.variants {
            if !names.insert(variant.name) {
                return Err(Error::invalid_catalog(format!(
                    "enum '{}' repeats variant name '{}'",
                    descriptor.id, variant.name
                )));
            }
            if !values.insert(variant.value) {
                return Err(Error::invalid_catalog(format!(
                    "enum '{}' repeats variant value '{}'",
                    descriptor.id, variant.value
                )));
            }
        }
        Ok(())
    }

    fn check_schema(&self, schema: &SchemaDescriptor) -> Result<()> {
        let mut names = HashSet::new();
        for field in schema.fields {
            if !names.insert(field.name) {
                return Err(Error::invalid_catalog(format!(
                    "schema '{}' repeats field '{}'",
                    schema.id, field.name
                )));
            }
            self.check_tag(schema.id, field.name, &field.tag)?;
        }
        Ok(())
    }

    fn check_tag(&self, schema: &str, field: &str, tag: &TypeTag) -> Result<()> {
        for id in tag.record_refs() {
            if !self.schemas.contains_key(id) {
                return Err(Error::invalid_catalog(format!(
                    "{schema}.{field} references unknown schema '{id}'"
                )));
            }
        }
        for id in tag.enum_refs() {
            if !self.enums.contains_key(id) {
                return Err(Error::invalid_catalog(format!(
                    "{schema}.{field} references unknown enum '{id}'"
                )));
            }
        }
        self.check_mapping_keys(schema, field, tag)
    }

    /// Mapping keys are JSON object keys, so only strings and enums make sense
    fn check_mapping_keys(&self, schema: &str, field: &str, tag: &TypeTag) -> Result<()> {
        match tag {
            TypeTag::Sequence(inner) => self.check_mapping_keys(schema, field, inner),
            TypeTag::Mapping(key, value) => {
                if !matches!(key, TypeTag::Enum(_)) && **key != TypeTag::STRING {
                    return Err(Error::invalid_catalog(format!(
                        "{schema}.{field} has unsupported mapping key {key}"
                    )));
                }
                self.check_mapping_keys(schema, field, value)
            }
            _ => Ok(()),
        }
    }

    fn check_acyclic(&self) -> Result<()> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            Visiting,
            Done,
        }

        fn visit(
            registry: &Registry,
            id: &'static str,
            marks: &mut HashMap<&'static str, Mark>,
            path: &mut Vec<&'static str>,
        ) -> Result<()> {
            match marks.get(id) {
                Some(Mark::Done) => return Ok(()),
                Some(Mark::Visiting) => {
                    path.push(id);
                    return Err(Error::invalid_catalog(format!(
                        "recursive schema: {}",
                        path.join(" -> ")
                    )));
                }
                None => {}
            }
            marks.insert(id, Mark::Visiting);
            path.push(id);
            if let Some(schema) = registry.schema(id) {
                for field in schema.fields {
                    for child in field.tag.record_refs() {
                        visit(registry, child, marks, path)?;
                    }
                }
            }
            path.pop();
            marks.insert(id, Mark::Done);
            Ok(())
        }

        let mut marks = HashMap::new();
        let mut ids: Vec<&'static str> = self.schemas.keys().copied().collect();
        ids.sort_unstable();
        for id in ids {
            visit(self, id, &mut marks, &mut Vec::new())?;
        }
        Ok(())
    }

    fn check_endpoint(&self, endpoint: &EndpointDescriptor) -> Result<()> {
        let Some(response) = self.schema(endpoint.response_schema) else {
            return Err(Error::invalid_catalog(format!(
                "endpoint '{}' references unknown schema '{}'",
                endpoint.id, endpoint.response_schema
            )));
        };
        if response.field(endpoint.envelope).is_none() {
            return Err(Error::invalid_catalog(format!(
                "endpoint '{}' envelope '{}' is not a field of '{}'",
                endpoint.id, endpoint.envelope, response.id
            )));
        }

        let placeholders = template::extract_placeholders(endpoint.url_template);
        let mut declared = Vec::with_capacity(placeholders.len());
        for name in placeholders {
            match Arg::from_placeholder(name) {
                Some(arg) => declared.push(arg),
                None => {
                    return Err(Error::invalid_catalog(format!(
                        "endpoint '{}' uses unknown placeholder '{{{name}}}'",
                        endpoint.id
                    )))
                }
            }
        }
        if declared != endpoint.required_arguments {
            return Err(Error::invalid_catalog(format!(
                "endpoint '{}' template placeholders do not match its required arguments",
                endpoint.id
            )));
        }
        Ok(())
    }
}
