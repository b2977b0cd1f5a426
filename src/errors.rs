/*
 * OrbitalModulator - Professional Modular Synthesizer
 * Copyright (c) 2025 MACHIKO LAB
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 */

use thiserror::Error;

/// コード生成全体のエラー型
///
/// Every variant is a deterministic configuration problem in the patch.
/// Generation stops at the first one and no text is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// 未知のモジュールタイプ
    #[error("Unknown module type '{kind}' on module '{module}'")]
    UnknownModuleType { module: String, kind: String },

    /// テンプレートに必要なパラメーターがない
    #[error("Module '{module}' is missing required parameter '{param}'")]
    MissingParameter { module: String, param: String },

    /// パラメーター値を式として描画できない
    #[error("Parameter '{param}' on module '{module}' is invalid: {reason}")]
    InvalidParameter {
        module: String,
        param: String,
        reason: String,
    },

    /// left/right と output の同時使用
    #[error(
        "Patch routes to left/right ({stereo} connection(s)) and to output ({output} connection(s)); use one or the other"
    )]
    InvalidRouting { stereo: usize, output: usize },

    /// モジュールIDの重複
    #[error("Module id '{module}' is declared more than once")]
    DuplicateModule { module: String },

    /// 予約名や生成名と衝突するモジュールID
    #[error("Module id '{module}' cannot be used: {reason}")]
    InvalidModuleId { module: String, reason: String },

    /// 存在しないモジュールへの参照（strictモードのみ）
    #[error("Connection {connection} references unknown module '{reference}'")]
    UnknownReference {
        reference: String,
        connection: String,
    },
}

/// 結果型のエイリアス
pub type GenerationResult<T> = Result<T, GenerationError>;

impl GenerationError {
    pub fn missing(module: &str, param: &str) -> Self {
        GenerationError::MissingParameter {
            module: module.to_string(),
            param: param.to_string(),
        }
    }

    pub fn invalid(module: &str, param: &str, reason: &str) -> Self {
        GenerationError::InvalidParameter {
            module: module.to_string(),
            param: param.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn unknown_type(module: &str, kind: &str) -> Self {
        GenerationError::UnknownModuleType {
            module: module.to_string(),
            kind: kind.to_string(),
        }
    }

    pub fn invalid_id(module: &str, reason: impl Into<String>) -> Self {
        GenerationError::InvalidModuleId {
            module: module.to_string(),
            reason: reason.into(),
        }
    }

    /// プロセス終了コード
    pub fn exit_code(&self) -> i32 {
        match self {
            GenerationError::UnknownModuleType { .. } => 2,
            GenerationError::MissingParameter { .. }
            | GenerationError::InvalidParameter { .. } => 3,
            GenerationError::InvalidRouting { .. } => 4,
            GenerationError::DuplicateModule { .. }
            | GenerationError::InvalidModuleId { .. }
            | GenerationError::UnknownReference { .. } => 5,
        }
    }
}
