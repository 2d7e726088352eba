use std::fmt;

macro_rules! forall_instructions {
    ($m:ident) => {
        $m! {
            Call => "CALL",
            CallCode => "CALLCODE",
            DelegateCall => "DELEGATECALL",
            StaticCall => "STATICCALL",
            Create => "CREATE",
            SStore => "SSTORE",
            Log0 => "LOG0",
            Log1 => "LOG1",
            Log2 => "LOG2",
            Log3 => "LOG3",
            Log4 => "LOG4",
            Return => "RETURN",
            Revert => "REVERT",
            SelfDestruct => "SELFDESTRUCT",
            Invalid => "INVALID",
        }
    };
}

macro_rules! instruction_enum {
    ($($variant:ident => $name:literal,)*) => {
        /// Canonical instructions that may tag a trace record.
        ///
        /// These are the externally observable operations of the wider instruction family
        /// the builtins model. Their names are part of the trace format.
        #[allow(missing_docs)]
        #[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Copy, Clone, Hash)]
        pub enum Instruction {
            $($variant,)*
        }

        impl Instruction {
            /// All instructions in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)*];

            /// Name of the instruction as it appears in a rendered trace.
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)*
                }
            }
        }
    };
}

forall_instructions!(instruction_enum);

impl Instruction {
    /// Returns the `LOGn` instruction for the given number of topics, or `None` if there
    /// are more than four.
    pub const fn log(topics: usize) -> Option<Self> {
        Some(match topics {
            0 => Self::Log0,
            1 => Self::Log1,
            2 => Self::Log2,
            3 => Self::Log3,
            4 => Self::Log4,
            _ => return None,
        })
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}
