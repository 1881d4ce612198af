use crate::{
    abi::{
        AbiDef, ActionDef, ActionResultDef, ClausePair, ErrorMessage, ExtensionsEntry, FieldDef,
        StructDef, TableDef, TypeDef, VariantDef, ABI_VERSION_PREFIX,
    },
    error::AbiEncodingError,
    serialize::SerialBuffer,
};

/// Turns an ABI definition into the raw bytes the chain stores for `setabi`.
#[auto_impl::auto_impl(&, Arc, Box)]
pub trait AbiEncoder: Send + Sync {
    fn encode_abi(&self, abi: &AbiDef) -> Result<Vec<u8>, AbiEncodingError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct BinaryAbiEncoder;

impl AbiEncoder for BinaryAbiEncoder {
    fn encode_abi(&self, abi: &AbiDef) -> Result<Vec<u8>, AbiEncodingError> {
        if !abi.version.starts_with(ABI_VERSION_PREFIX) {
            return Err(AbiEncodingError::UnsupportedVersion(abi.version.clone()));
        }
        let mut buf = SerialBuffer::new();
        buf.push_string(&abi.version)?;
        buf.push_array("types", &abi.types, push_type_def)?;
        buf.push_array("structs", &abi.structs, push_struct_def)?;
        buf.push_array("actions", &abi.actions, push_action_def)?;
        buf.push_array("tables", &abi.tables, push_table_def)?;
        buf.push_array("ricardian_clauses", &abi.ricardian_clauses, push_clause_pair)?;
        buf.push_array("error_messages", &abi.error_messages, push_error_message)?;
        buf.push_array("abi_extensions", &abi.abi_extensions, push_extension)?;

        // binary extensions: a later one can only be present if every earlier one is
        match (&abi.variants, &abi.action_results) {
            (None, None) => {}
            (variants, action_results) => {
                let variants = variants.as_deref().unwrap_or_default();
                buf.push_array("variants", variants, push_variant_def)?;
                if let Some(action_results) = action_results {
                    buf.push_array("action_results", action_results, push_action_result_def)?;
                }
            }
        }
        Ok(buf.into_bytes())
    }
}

fn push_type_def(buf: &mut SerialBuffer, def: &TypeDef) -> Result<(), AbiEncodingError> {
    buf.push_string(&def.new_type_name)?;
    buf.push_string(&def.type_)
}

fn push_field_def(buf: &mut SerialBuffer, def: &FieldDef) -> Result<(), AbiEncodingError> {
    buf.push_string(&def.name)?;
    buf.push_string(&def.type_)
}

fn push_struct_def(buf: &mut SerialBuffer, def: &StructDef) -> Result<(), AbiEncodingError> {
    buf.push_string(&def.name)?;
    buf.push_string(&def.base)?;
    buf.push_array("fields", &def.fields, push_field_def)
}

fn push_action_def(buf: &mut SerialBuffer, def: &ActionDef) -> Result<(), AbiEncodingError> {
    buf.push_name(&def.name);
    buf.push_string(&def.type_)?;
    buf.push_string(&def.ricardian_contract)
}

fn push_table_def(buf: &mut SerialBuffer, def: &TableDef) -> Result<(), AbiEncodingError> {
    buf.push_name(&def.name);
    buf.push_string(&def.index_type)?;
    buf.push_array("key_names", &def.key_names, |b, s| b.push_string(s))?;
    buf.push_array("key_types", &def.key_types, |b, s| b.push_string(s))?;
    buf.push_string(&def.type_)
}

fn push_clause_pair(buf: &mut SerialBuffer, def: &ClausePair) -> Result<(), AbiEncodingError> {
    buf.push_string(&def.id)?;
    buf.push_string(&def.body)
}

fn push_error_message(buf: &mut SerialBuffer, def: &ErrorMessage) -> Result<(), AbiEncodingError> {
    buf.push_u64(def.error_code);
    buf.push_string(&def.error_msg)
}

fn push_extension(buf: &mut SerialBuffer, def: &ExtensionsEntry) -> Result<(), AbiEncodingError> {
    buf.push_u16(def.tag);
    buf.push_bytes(&hex::decode(&def.value)?)
}

fn push_variant_def(buf: &mut SerialBuffer, def: &VariantDef) -> Result<(), AbiEncodingError> {
    buf.push_string(&def.name)?;
    buf.push_array("types", &def.types, |b, s| b.push_string(s))
}

fn push_action_result_def(
    buf: &mut SerialBuffer,
    def: &ActionResultDef,
) -> Result<(), AbiEncodingError> {
    buf.push_name(&def.name);
    buf.push_string(&def.result_type)
}
