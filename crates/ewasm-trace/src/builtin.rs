use std::{fmt, str::FromStr};

use primitive_types::U256;

use crate::BuiltinError;

macro_rules! forall_builtins {
    ($m:ident) => {
        $m! {
            // Control
            Nop => "nop", 0;
            I32Drop => "i32.drop", 1;
            I64Drop => "i64.drop", 1;
            Unreachable => "unreachable", 0;
            // Conversions
            I32WrapI64 => "i32.wrap_i64", 1;
            I64ExtendI32U => "i64.extend_i32_u", 1;
            // 64-bit arithmetic and logic
            I64Add => "i64.add", 2;
            I64Sub => "i64.sub", 2;
            I64Mul => "i64.mul", 2;
            I64DivU => "i64.div_u", 2;
            I64RemU => "i64.rem_u", 2;
            I64And => "i64.and", 2;
            I64Or => "i64.or", 2;
            I64Xor => "i64.xor", 2;
            I64Shl => "i64.shl", 2;
            I64ShrU => "i64.shr_u", 2;
            I64Rotl => "i64.rotl", 2;
            I64Rotr => "i64.rotr", 2;
            I64Eq => "i64.eq", 2;
            I64Ne => "i64.ne", 2;
            I64Eqz => "i64.eqz", 1;
            I64LtU => "i64.lt_u", 2;
            I64GtU => "i64.gt_u", 2;
            I64LeU => "i64.le_u", 2;
            I64GeU => "i64.ge_u", 2;
            I64Clz => "i64.clz", 1;
            I64Ctz => "i64.ctz", 1;
            I64Popcnt => "i64.popcnt", 1;
            // Linear memory
            I64Load => "i64.load", 1;
            I64Store => "i64.store", 2;
            I64Store8 => "i64.store8", 2;
            I32Store8 => "i32.store8", 2;
            // Object data
            DataSize => "datasize", 1;
            DataOffset => "dataoffset", 1;
            // Environment
            GetAddress => "eth.getAddress", 1;
            GetExternalBalance => "eth.getExternalBalance", 2;
            GetBlockHash => "eth.getBlockHash", 2;
            GetCallDataSize => "eth.getCallDataSize", 0;
            GetCaller => "eth.getCaller", 1;
            GetCallValue => "eth.getCallValue", 1;
            GetCodeSize => "eth.getCodeSize", 0;
            GetBlockCoinbase => "eth.getBlockCoinbase", 1;
            GetBlockDifficulty => "eth.getBlockDifficulty", 1;
            GetExternalCodeSize => "eth.getExternalCodeSize", 1;
            GetGasLeft => "eth.getGasLeft", 0;
            GetBlockGasLimit => "eth.getBlockGasLimit", 0;
            GetTxGasPrice => "eth.getTxGasPrice", 1;
            GetBlockNumber => "eth.getBlockNumber", 0;
            GetTxOrigin => "eth.getTxOrigin", 1;
            GetReturnDataSize => "eth.getReturnDataSize", 0;
            GetBlockTimestamp => "eth.getBlockTimestamp", 0;
            // Copies
            CallDataCopy => "eth.callDataCopy", 3;
            CodeCopy => "eth.codeCopy", 3;
            ExternalCodeCopy => "eth.externalCodeCopy", 4;
            ReturnDataCopy => "eth.returnDataCopy", 3;
            // Storage
            StorageStore => "eth.storageStore", 2;
            StorageLoad => "eth.storageLoad", 2;
            // Calls and contract creation
            Call => "eth.call", 5;
            CallCode => "eth.callCode", 5;
            CallDelegate => "eth.callDelegate", 4;
            CallStatic => "eth.callStatic", 4;
            Create => "eth.create", 4;
            // Logs and termination
            Log => "eth.log", 7;
            Finish => "eth.finish", 2;
            Revert => "eth.revert", 2;
            SelfDestruct => "eth.selfDestruct", 1;
        }
    };
}

macro_rules! builtin_enum {
    ($($variant:ident => $name:literal, $arity:literal;)*) => {
        /// All builtins understood by the interpreter.
        ///
        /// The set is closed: [`BuiltinInterpreter`](crate::BuiltinInterpreter) matches on it
        /// exhaustively, so a new builtin cannot be added without giving it semantics.
        #[allow(missing_docs)]
        #[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Copy, Clone, Hash)]
        pub enum Builtin {
            $($variant,)*
        }

        impl Builtin {
            /// All builtins in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)*];

            /// Name of the builtin in the instruction stream.
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)*
                }
            }

            /// Number of arguments the builtin takes.
            pub const fn arity(self) -> usize {
                match self {
                    $(Self::$variant => $arity,)*
                }
            }
        }

        impl FromStr for Builtin {
            type Err = BuiltinError;

            fn from_str(name: &str) -> Result<Self, Self::Err> {
                match name {
                    $($name => Ok(Self::$variant),)*
                    _ => Err(BuiltinError::Unknown(name.to_owned())),
                }
            }
        }
    };
}

forall_builtins!(builtin_enum);

impl fmt::Display for Builtin {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

#[cfg(feature = "arbitrary")]
impl<'a> arbitrary::Arbitrary<'a> for Builtin {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        u.choose(Self::ALL).copied()
    }
}

/// Builtin together with arguments of matching arity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BuiltinCall {
    builtin: Builtin,
    arguments: Vec<U256>,
}

impl BuiltinCall {
    /// Resolves `name` and checks that `arguments` matches its arity.
    ///
    /// # Errors
    ///
    /// Fails if the name is unknown or the number of arguments is wrong.
    pub fn new(name: &str, arguments: Vec<U256>) -> Result<Self, BuiltinError> {
        Self::with_builtin(name.parse()?, arguments)
    }

    /// Checks that `arguments` matches the arity of `builtin`.
    ///
    /// # Errors
    ///
    /// Fails if the number of arguments is wrong.
    pub fn with_builtin(builtin: Builtin, arguments: Vec<U256>) -> Result<Self, BuiltinError> {
        if arguments.len() != builtin.arity() {
            return Err(BuiltinError::ArityMismatch {
                builtin,
                expected: builtin.arity(),
                actual: arguments.len(),
            });
        }
        Ok(Self { builtin, arguments })
    }

    /// The invoked builtin.
    pub fn builtin(&self) -> Builtin {
        self.builtin
    }

    /// Arguments of the invocation.
    pub fn arguments(&self) -> &[U256] {
        &self.arguments
    }
}

impl fmt::Display for BuiltinCall {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}(", self.builtin)?;
        for (i, argument) in self.arguments.iter().enumerate() {
            if i > 0 {
                formatter.write_str(", ")?;
            }
            write!(formatter, "{argument:#x}")?;
        }
        formatter.write_str(")")
    }
}

/// Arguments are mostly small so that memory accesses overlap; occasionally they are
/// arbitrary 256-bit values.
#[cfg(feature = "arbitrary")]
impl<'a> arbitrary::Arbitrary<'a> for BuiltinCall {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let builtin: Builtin = u.arbitrary()?;
        let arguments = (0..builtin.arity())
            .map(|_| {
                Ok(match u.int_in_range(0..=7_u8)? {
                    0 => U256(u.arbitrary()?),
                    1 => U256::from(u.arbitrary::<u64>()?),
                    _ => U256::from(u.int_in_range(0..=0x140_u16)?),
                })
            })
            .collect::<arbitrary::Result<_>>()?;
        Ok(Self { builtin, arguments })
    }
}
