//! Qwen3 causal LM generator (candle + HF tokenizers).

use std::sync::Arc;

use candle_core::{D, DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::qwen3::{Config as Qwen3Config, ModelForCausalLM};
use parking_lot::Mutex;
use tokenizers::Tokenizer;
use tracing::{debug, info};

use super::config::EngineConfig;
use super::device::resolve_device;
use super::error::EngineError;
use super::generator::TextGenerator;
use super::types::{
    CompletionOutput, FinishReason, RequestOutput, SamplingParams, TokenLogprobs, greedy_token,
    position_logprobs,
};
use super::utils::{load_tokenizer, weight_files};

const STOP_TOKENS: [&str; 2] = ["<|im_end|>", "<|endoftext|>"];

/// Greedy generator over a locally stored Qwen3 checkpoint.
pub struct CandleGenerator {
    model: Mutex<ModelForCausalLM>,
    tokenizer: Arc<Tokenizer>,
    device: Device,
    config: EngineConfig,
    model_config: Qwen3Config,
    stop_token_ids: Vec<u32>,
}

impl std::fmt::Debug for CandleGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CandleGenerator")
            .field("device", &format!("{:?}", self.device))
            .field("config", &self.config)
            .field("vocab_size", &self.model_config.vocab_size)
            .field("num_hidden_layers", &self.model_config.num_hidden_layers)
            .field("stop_token_ids", &self.stop_token_ids)
            .finish()
    }
}

impl CandleGenerator {
    pub fn load(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;

        let model_dir = &config.model_dir;
        if !model_dir.is_dir() {
            return Err(EngineError::ModelNotFound {
                path: model_dir.clone(),
            });
        }

        let config_path = config.config_path();
        if !config_path.is_file() {
            return Err(EngineError::ModelLoadFailed {
                reason: format!("Missing config.json in {}", model_dir.display()),
            });
        }

        let weights = weight_files(model_dir)?;

        let device = resolve_device(config.device)?;
        debug!(preference = ?config.device, ?device, "Selected compute device for generator");

        info!(
            model_dir = %model_dir.display(),
            shards = weights.len(),
            max_model_len = config.max_model_len,
            dtype = ?config.dtype,
            "Loading model and tokenizer"
        );

        let tokenizer =
            load_tokenizer(&config.tokenizer_path()).map_err(|e| EngineError::TokenizationFailed {
                reason: format!("Failed to load tokenizer: {}", e),
            })?;

        let model_config: Qwen3Config =
            serde_json::from_str(&std::fs::read_to_string(&config_path)?).map_err(|e| {
                EngineError::ModelLoadFailed {
                    reason: format!("Failed to parse config.json: {}", e),
                }
            })?;

        let vb = unsafe { VarBuilder::from_mmaped_safetensors(&weights, config.dtype, &device) }
            .map_err(|e| EngineError::ModelLoadFailed {
                reason: format!("Failed to map safetensors: {}", e),
            })?;

        let model =
            ModelForCausalLM::new(&model_config, vb).map_err(|e| EngineError::ModelLoadFailed {
                reason: format!("Failed to build Qwen3 model: {}", e),
            })?;

        let stop_token_ids: Vec<u32> = STOP_TOKENS
            .iter()
            .filter_map(|t| tokenizer.token_to_id(t))
            .collect();

        info!(
            vocab_size = model_config.vocab_size,
            num_hidden_layers = model_config.num_hidden_layers,
            hidden_size = model_config.hidden_size,
            "Qwen3 model loaded successfully"
        );

        Ok(Self {
            model: Mutex::new(model),
            tokenizer: Arc::new(tokenizer),
            device,
            config,
            model_config,
            stop_token_ids,
        })
    }

    fn generate_one(
        &self,
        prompt: &str,
        params: &SamplingParams,
    ) -> Result<RequestOutput, EngineError> {
        let encoding =
            self.tokenizer
                .encode(prompt, false)
                .map_err(|e| EngineError::TokenizationFailed {
                    reason: e.to_string(),
                })?;

        let prompt_token_ids = encoding.get_ids().to_vec();
        if prompt_token_ids.is_empty() {
            return Err(EngineError::EmptyPrompt);
        }

        if prompt_token_ids.len() + params.max_tokens > self.config.max_model_len {
            return Err(EngineError::PromptTooLong {
                prompt_tokens: prompt_token_ids.len(),
                max_tokens: params.max_tokens,
                max_model_len: self.config.max_model_len,
            });
        }

        debug!(
            prompt_len = prompt.len(),
            token_count = prompt_token_ids.len(),
            max_tokens = params.max_tokens,
            "Running generation"
        );

        let mut model = self.model.lock();
        model.clear_kv_cache();

        let mut input = prompt_token_ids.clone();
        let mut offset = 0;
        let mut token_ids = Vec::with_capacity(params.max_tokens);
        let mut positions: Vec<TokenLogprobs> = Vec::with_capacity(params.max_tokens);
        let mut finish_reason = FinishReason::Length;

        for _ in 0..params.max_tokens {
            let input_ids = Tensor::new(input.as_slice(), &self.device)?.unsqueeze(0)?;

            // [1, 1, vocab] for the last input position
            let logits = model.forward(&input_ids, offset)?;
            let logits = logits.squeeze(0)?.squeeze(0)?.to_dtype(DType::F32)?;
            let logprobs = candle_nn::ops::log_softmax(&logits, D::Minus1)?.to_vec1::<f32>()?;

            let next = greedy_token(&logprobs).ok_or_else(|| EngineError::InferenceFailed {
                reason: "model returned an empty vocabulary row".to_string(),
            })?;

            if params.logprobs > 0 {
                positions.push(self.annotated_logprobs(&logprobs, next, params.logprobs));
            }

            offset += input.len();
            input = vec![next];
            token_ids.push(next);

            if self.stop_token_ids.contains(&next) {
                finish_reason = FinishReason::Stop;
                break;
            }
        }
        drop(model);

        let text = self.tokenizer.decode(&token_ids, true).map_err(|e| {
            EngineError::TokenizationFailed {
                reason: format!("Failed to decode output: {}", e),
            }
        })?;

        Ok(RequestOutput {
            prompt: prompt.to_string(),
            prompt_token_ids,
            outputs: vec![CompletionOutput {
                index: 0,
                text,
                token_ids,
                logprobs: (params.logprobs > 0).then_some(positions),
                finish_reason: Some(finish_reason),
            }],
        })
    }

    fn annotated_logprobs(&self, row: &[f32], sampled: u32, k: usize) -> TokenLogprobs {
        let mut entries = position_logprobs(row, sampled, k);
        for (id, entry) in entries.iter_mut() {
            entry.decoded_token = self.tokenizer.id_to_token(*id);
        }
        entries
    }
}

impl TextGenerator for CandleGenerator {
    fn generate(
        &self,
        prompts: &[String],
        params: &SamplingParams,
    ) -> Result<Vec<RequestOutput>, EngineError> {
        params.validate()?;
        if !params.is_greedy() {
            return Err(EngineError::UnsupportedSampling {
                reason: format!(
                    "only greedy decoding (temperature 0) is supported, got {}",
                    params.temperature
                ),
            });
        }

        prompts
            .iter()
            .map(|prompt| self.generate_one(prompt, params))
            .collect()
    }

    fn token_id(&self, token: &str) -> Option<u32> {
        self.tokenizer.token_to_id(token)
    }
}
