use ewasm_trace_interface::Instruction;
use primitive_types::U256;

use super::{
    access::{copy_zero_extended, range_in_bounds},
    mock,
};
use crate::{Builtin, BuiltinInterpreter, CropWidth, ExecutionEnd, Trap};

/// Copies between memory and the environment, storage, calls and termination.
impl BuiltinInterpreter<'_> {
    /// `eth.callDataCopy(resultOffset, dataOffset, length)`
    pub(crate) fn call_data_copy(
        &mut self,
        builtin: Builtin,
        arguments: &[U256],
        arg: &[u64],
    ) -> Result<U256, ExecutionEnd> {
        let (offset, source_offset, len) = (arg[0], arg[1], arg[2]);
        if !range_in_bounds(source_offset, len, self.env().calldata.len()) {
            return Err(self.trap(builtin, arguments, Trap::CopyOutOfBounds));
        }
        if self.access_memory(offset, len) {
            let state = &mut *self.state;
            let calldata = &state.environment.calldata;
            copy_zero_extended(&mut state.memory, offset, calldata, source_offset, len);
        }
        Ok(U256::zero())
    }

    /// `eth.returnDataCopy(resultOffset, dataOffset, length)`
    pub(crate) fn return_data_copy(
        &mut self,
        builtin: Builtin,
        arguments: &[U256],
        arg: &[u64],
    ) -> Result<U256, ExecutionEnd> {
        let (offset, source_offset, len) = (arg[0], arg[1], arg[2]);
        if !range_in_bounds(source_offset, len, self.env().return_data.len()) {
            return Err(self.trap(builtin, arguments, Trap::CopyOutOfBounds));
        }
        if self.access_memory(offset, len) {
            let state = &mut *self.state;
            let return_data = &state.environment.return_data;
            copy_zero_extended(&mut state.memory, offset, return_data, source_offset, len);
        }
        Ok(U256::zero())
    }

    /// `eth.codeCopy(resultOffset, codeOffset, length)`
    pub(crate) fn code_copy(&mut self, arg: &[u64]) -> U256 {
        let (offset, source_offset, len) = (arg[0], arg[1], arg[2]);
        if self.access_memory(offset, len) {
            let state = &mut *self.state;
            let code = &state.environment.code;
            copy_zero_extended(&mut state.memory, offset, code, source_offset, len);
        }
        U256::zero()
    }

    /// `eth.externalCodeCopy(addressOffset, resultOffset, codeOffset, length)`
    pub(crate) fn external_code_copy(&mut self, arg: &[u64]) -> U256 {
        let address = self.read_address(arg[0]);
        let (offset, source_offset, len) = (arg[1], arg[2], arg[3]);
        if self.access_memory(offset, len) {
            let code = mock::external_code(address);
            copy_zero_extended(&mut self.state.memory, offset, &code, source_offset, len);
        }
        U256::zero()
    }

    /// `eth.storageStore(pathOffset, valueOffset)`
    pub(crate) fn storage_store(&mut self, arg: &[u64]) -> Result<U256, ExecutionEnd> {
        let key = self.read_u256(arg[0], CropWidth::Full);
        let value = self.read_u256(arg[1], CropWidth::Full);
        self.state.storage.insert(key, value);
        self.state
            .log_trace(Instruction::SStore, vec![key, value], vec![])?;
        Ok(U256::zero())
    }

    /// `eth.storageLoad(pathOffset, resultOffset)`
    pub(crate) fn storage_load(&mut self, arg: &[u64]) -> U256 {
        let key = self.read_u256(arg[0], CropWidth::Full);
        let value = self.state.storage.get(&key).copied().unwrap_or_default();
        self.write_u256(arg[1], value, CropWidth::Full)
    }

    /// `eth.call` and `eth.callCode`: `(gas, addressOffset, valueOffset, dataOffset, dataLength)`.
    ///
    /// The callee is not executed. The call succeeds iff `gas` is odd.
    pub(crate) fn call(
        &mut self,
        instruction: Instruction,
        arg: &[u64],
    ) -> Result<U256, ExecutionEnd> {
        let (gas, data_offset, data_len) = (arg[0], arg[3], arg[4]);
        let address = self.read_address(arg[1]);
        let value = self.read_u128(arg[2]);
        let input = self.read_payload(data_offset, data_len);
        self.state.log_trace(
            instruction,
            vec![
                gas.into(),
                address,
                value,
                data_offset.into(),
                data_len.into(),
            ],
            input,
        )?;
        Ok((gas & 1).into())
    }

    /// `eth.callDelegate` and `eth.callStatic`: `(gas, addressOffset, dataOffset, dataLength)`.
    pub(crate) fn call_without_value(
        &mut self,
        instruction: Instruction,
        arg: &[u64],
    ) -> Result<U256, ExecutionEnd> {
        let (gas, data_offset, data_len) = (arg[0], arg[2], arg[3]);
        let address = self.read_address(arg[1]);
        let input = self.read_payload(data_offset, data_len);
        self.state.log_trace(
            instruction,
            vec![gas.into(), address, data_offset.into(), data_len.into()],
            input,
        )?;
        Ok((gas & 1).into())
    }

    /// `eth.create(valueOffset, dataOffset, length, resultOffset)`
    pub(crate) fn create(&mut self, arg: &[u64]) -> Result<U256, ExecutionEnd> {
        let (data_offset, data_len, result_offset) = (arg[1], arg[2], arg[3]);
        let value = self.read_u128(arg[0]);
        let init_code = self.read_payload(data_offset, data_len);
        self.state.log_trace(
            Instruction::Create,
            vec![value, data_offset.into(), data_len.into()],
            init_code,
        )?;
        let address = mock::created_address(data_len);
        self.write_u256(result_offset, address, CropWidth::Address);
        Ok(U256::zero())
    }

    /// `eth.log(dataOffset, length, numberOfTopics, topic1, topic2, topic3, topic4)`
    ///
    /// Topics are offsets of 32-byte values.
    pub(crate) fn log(
        &mut self,
        builtin: Builtin,
        arguments: &[U256],
        arg: &[u64],
    ) -> Result<U256, ExecutionEnd> {
        let Some((topic_count, instruction)) = usize::try_from(arg[2])
            .ok()
            .and_then(|count| Some((count, Instruction::log(count)?)))
        else {
            return Err(self.trap(builtin, arguments, Trap::TooManyTopics));
        };

        let topics = arg[3..3 + topic_count]
            .iter()
            .map(|&offset| self.read_u256(offset, CropWidth::Full))
            .collect();
        let data = self.read_payload(arg[0], arg[1]);
        self.state.log_trace(instruction, topics, data)?;
        Ok(U256::zero())
    }

    /// `eth.finish(dataOffset, length)`
    pub(crate) fn finish(&mut self, arg: &[u64]) -> ExecutionEnd {
        let data = self.read_payload(arg[0], arg[1]);
        match self
            .state
            .log_trace(Instruction::Return, vec![], data.clone())
        {
            Ok(()) => ExecutionEnd::Finished(data),
            Err(end) => end,
        }
    }

    /// `eth.revert(dataOffset, length)`
    pub(crate) fn revert(&mut self, arg: &[u64]) -> ExecutionEnd {
        let data = self.read_payload(arg[0], arg[1]);
        match self
            .state
            .log_trace(Instruction::Revert, vec![], data.clone())
        {
            Ok(()) => ExecutionEnd::Reverted(data),
            Err(end) => end,
        }
    }

    /// `eth.selfDestruct(addressOffset)`
    pub(crate) fn self_destruct(&mut self, arg: &[u64]) -> ExecutionEnd {
        let beneficiary = self.read_address(arg[0]);
        match self
            .state
            .log_trace(Instruction::SelfDestruct, vec![beneficiary], vec![])
        {
            Ok(()) => ExecutionEnd::SelfDestructed,
            Err(end) => end,
        }
    }
}
